use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::dispatch::{KnowledgeBase, PriorityThresholds, ScoringWeights};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub classifier: ClassifierConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let format = LogFormat::parse(
            &env::var("APP_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string()),
        )?;

        let api_key = env::var("HUGGINGFACE_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        let endpoint = env::var("ETHOS_CLASSIFIER_ENDPOINT")
            .unwrap_or_else(|_| ClassifierConfig::DEFAULT_ENDPOINT.to_string());
        let model = env::var("ETHOS_CLASSIFIER_MODEL")
            .unwrap_or_else(|_| ClassifierConfig::DEFAULT_MODEL.to_string());
        let timeout_secs = env::var("ETHOS_CLASSIFIER_TIMEOUT_SECS")
            .unwrap_or_else(|_| ClassifierConfig::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidTimeout)?;

        let defaults = ScoringConfig::default();
        let weights = ScoringWeights {
            harm: read_weight("ETHOS_WEIGHT_HARM", defaults.weights.harm)?,
            vulnerability: read_weight(
                "ETHOS_WEIGHT_VULNERABILITY",
                defaults.weights.vulnerability,
            )?,
            time: read_weight("ETHOS_WEIGHT_TIME", defaults.weights.time)?,
        };
        let thresholds = PriorityThresholds {
            critical: read_number("ETHOS_THRESHOLD_CRITICAL", defaults.thresholds.critical)?,
            high: read_number("ETHOS_THRESHOLD_HIGH", defaults.thresholds.high)?,
        };
        if thresholds.critical <= thresholds.high {
            return Err(ConfigError::InvalidThresholds {
                critical: thresholds.critical,
                high: thresholds.high,
            });
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level, format },
            classifier: ClassifierConfig {
                api_key,
                endpoint,
                model,
                timeout_secs,
            },
            scoring: ScoringConfig {
                weights,
                thresholds,
            },
        })
    }
}

fn read_number(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or(ConfigError::InvalidNumber { key }),
        Err(_) => Ok(default),
    }
}

fn read_weight(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    let value = read_number(key, default)?;
    if value < 0.0 {
        return Err(ConfigError::NegativeWeight { key });
    }
    Ok(value)
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Output style for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" | "" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidLogFormat(value.to_string())),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

/// Connection settings for the zero-shot fallback classifier.
#[derive(Clone)]
pub struct ClassifierConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl ClassifierConfig {
    pub const DEFAULT_ENDPOINT: &'static str = "https://router.huggingface.co/hf-inference";
    pub const DEFAULT_MODEL: &'static str = "facebook/bart-large-mnli";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    pub fn model_url(&self) -> String {
        format!(
            "{}/models/{}",
            self.endpoint.trim_end_matches('/'),
            self.model.trim_matches('/')
        )
    }
}

impl fmt::Debug for ClassifierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Weight and threshold overrides layered onto the standard knowledge base.
#[derive(Debug, Clone, Default)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    pub thresholds: PriorityThresholds,
}

impl ScoringConfig {
    pub fn knowledge_base(&self) -> KnowledgeBase {
        KnowledgeBase::standard()
            .with_weights(self.weights)
            .with_thresholds(self.thresholds)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidLogFormat(String),
    InvalidTimeout,
    InvalidNumber { key: &'static str },
    NegativeWeight { key: &'static str },
    InvalidThresholds { critical: f64, high: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidLogFormat(value) => {
                write!(f, "APP_LOG_FORMAT must be 'compact' or 'json' (got '{value}')")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "ETHOS_CLASSIFIER_TIMEOUT_SECS must be a whole number of seconds")
            }
            ConfigError::InvalidNumber { key } => write!(f, "{key} must be a finite number"),
            ConfigError::NegativeWeight { key } => write!(f, "{key} must not be negative"),
            ConfigError::InvalidThresholds { critical, high } => write!(
                f,
                "ETHOS_THRESHOLD_CRITICAL ({critical}) must be greater than ETHOS_THRESHOLD_HIGH ({high})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
