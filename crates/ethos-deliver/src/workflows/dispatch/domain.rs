use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Route placeholder used when the caller does not supply pickup or dropoff.
pub const UNSPECIFIED_LOCATION: &str = "N/A";

/// Request record handed to the pipeline. Built once per request and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryInput {
    pub description: String,
    pub pickup: String,
    pub dropoff: String,
}

impl DeliveryInput {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            pickup: UNSPECIFIED_LOCATION.to_string(),
            dropoff: UNSPECIFIED_LOCATION.to_string(),
        }
    }

    pub fn with_route(
        description: impl Into<String>,
        pickup: Option<&str>,
        dropoff: Option<&str>,
    ) -> Self {
        Self {
            description: description.into(),
            pickup: pickup.unwrap_or(UNSPECIFIED_LOCATION).to_string(),
            dropoff: dropoff.unwrap_or(UNSPECIFIED_LOCATION).to_string(),
        }
    }
}

/// Coarse classification of package contents driving the risk defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainCategory {
    Medical,
    Emergency,
    Essential,
    General,
}

impl DomainCategory {
    pub const ALL: [DomainCategory; 4] = [
        DomainCategory::Medical,
        DomainCategory::Emergency,
        DomainCategory::Essential,
        DomainCategory::General,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DomainCategory::Medical => "MEDICAL",
            DomainCategory::Emergency => "EMERGENCY",
            DomainCategory::Essential => "ESSENTIAL",
            DomainCategory::General => "GENERAL",
        }
    }

    /// Case-insensitive lookup used when mapping classifier labels back to domains.
    pub fn from_label(raw: &str) -> Option<Self> {
        let needle = raw.trim();
        Self::ALL
            .into_iter()
            .find(|domain| domain.label().eq_ignore_ascii_case(needle))
    }

    pub fn is_human_dependent(&self) -> bool {
        matches!(self, DomainCategory::Medical | DomainCategory::Emergency)
    }
}

impl fmt::Display for DomainCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How the final domain of a [`ContextAnalysis`] was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextSource {
    KeywordMatch,
    ModelFallback,
    Default,
}

/// Audit record of the fallback classifier call for a single request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FallbackAttempt {
    NotAttempted,
    Adopted {
        label: DomainCategory,
        confidence: f64,
    },
    ReturnedGeneral {
        confidence: f64,
    },
    Unavailable {
        reason: String,
    },
}

/// Output of the context stage, derived solely from the delivery input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextAnalysis {
    pub domain: DomainCategory,
    pub detected_keywords: Vec<String>,
    pub is_human_dependent: bool,
    pub source: ContextSource,
    pub fallback: FallbackAttempt,
}

/// Three-axis severity estimate, each axis on a 0..=10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub harm_severity: u8,
    pub vulnerability: u8,
    pub time_sensitivity: u8,
}

impl RiskProfile {
    pub const MAX_AXIS: u8 = 10;

    pub const fn new(harm_severity: u8, vulnerability: u8, time_sensitivity: u8) -> Self {
        Self {
            harm_severity,
            vulnerability,
            time_sensitivity,
        }
    }

    pub fn within_scale(&self) -> bool {
        [self.harm_severity, self.vulnerability, self.time_sensitivity]
            .iter()
            .all(|axis| *axis <= Self::MAX_AXIS)
    }
}

impl Default for RiskProfile {
    fn default() -> Self {
        Self::new(1, 1, 1)
    }
}

/// Weighted composite of the risk axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EthicalScore {
    pub harm_score: f64,
    pub vulnerability_score: f64,
    pub time_score: f64,
    pub total_score: f64,
}

/// Dispatch urgency. Serialized as the integers 1, 2 and 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum PriorityLevel {
    Critical,
    High,
    Standard,
}

impl PriorityLevel {
    pub fn level(&self) -> u8 {
        match self {
            PriorityLevel::Critical => 1,
            PriorityLevel::High => 2,
            PriorityLevel::Standard => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriorityLevel::Critical => "CRITICAL",
            PriorityLevel::High => "HIGH",
            PriorityLevel::Standard => "STANDARD",
        }
    }
}

impl From<PriorityLevel> for u8 {
    fn from(value: PriorityLevel) -> Self {
        value.level()
    }
}

impl TryFrom<u8> for PriorityLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PriorityLevel::Critical),
            2 => Ok(PriorityLevel::High),
            3 => Ok(PriorityLevel::Standard),
            other => Err(format!("priority level must be 1, 2 or 3 (got {other})")),
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

/// Decision with priority and approval fixed but no explanation rendered yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDecision {
    pub priority_level: PriorityLevel,
    pub requires_approval: bool,
    pub context: ContextAnalysis,
    pub risk: RiskProfile,
    pub score: EthicalScore,
}

impl PendingDecision {
    pub fn finalize(self, explanation: String) -> DeliveryDecision {
        DeliveryDecision {
            priority_level: self.priority_level,
            requires_approval: self.requires_approval,
            explanation,
            context: self.context,
            risk: self.risk,
            score: self.score,
        }
    }
}

/// Fully populated triage result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryDecision {
    pub priority_level: PriorityLevel,
    pub requires_approval: bool,
    pub explanation: String,
    pub context: ContextAnalysis,
    pub risk: RiskProfile,
    pub score: EthicalScore,
}

impl DeliveryDecision {
    pub fn view(&self) -> DecisionView {
        self.view_at(Utc::now())
    }

    pub fn view_at(&self, evaluated_at: DateTime<Utc>) -> DecisionView {
        DecisionView {
            priority_level: self.priority_level,
            requires_approval: self.requires_approval,
            explanation: self.explanation.clone(),
            score: self.score.total_score,
            domain: self.context.domain,
            detected_keywords: self.context.detected_keywords.clone(),
            is_human_dependent: self.context.is_human_dependent,
            evaluated_at,
        }
    }
}

/// Flat transport record exposed over HTTP and by the CLI `--json` flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionView {
    pub priority_level: PriorityLevel,
    pub requires_approval: bool,
    pub explanation: String,
    pub score: f64,
    pub domain: DomainCategory,
    pub detected_keywords: Vec<String>,
    pub is_human_dependent: bool,
    pub evaluated_at: DateTime<Utc>,
}
