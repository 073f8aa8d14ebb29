use ethos_deliver::config::{AppConfig, ClassifierConfig};
use ethos_deliver::workflows::dispatch::{
    DisabledClassifier, FallbackClassifier, HuggingFaceClassifier, TriagePipeline,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Picks the fallback classifier for the configured credential.
///
/// Builds a blocking HTTP client, so it must run outside the async executor.
pub(crate) fn fallback_classifier(config: &ClassifierConfig) -> Arc<dyn FallbackClassifier> {
    if config.api_key.is_none() {
        warn!("HUGGINGFACE_API_KEY not set; fallback classification disabled");
        return Arc::new(DisabledClassifier);
    }

    match HuggingFaceClassifier::new(config) {
        Ok(classifier) => Arc::new(classifier),
        Err(err) => {
            warn!(error = %err, "fallback classifier unavailable; continuing with keyword rules only");
            Arc::new(DisabledClassifier)
        }
    }
}

pub(crate) fn build_pipeline(config: &AppConfig) -> TriagePipeline {
    TriagePipeline::new(
        config.scoring.knowledge_base(),
        fallback_classifier(&config.classifier),
    )
}
