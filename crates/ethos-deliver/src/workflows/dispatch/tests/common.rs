use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::dispatch::classifier::{
    ClassifierUnavailable, ContextClassifier, FallbackClassifier, RankedLabel,
};
use crate::workflows::dispatch::domain::{
    ContextAnalysis, ContextSource, DeliveryInput, DomainCategory, FallbackAttempt,
};
use crate::workflows::dispatch::knowledge::KnowledgeBase;
use crate::workflows::dispatch::pipeline::TriagePipeline;

/// Fallback double returning a canned verdict and recording every call.
#[derive(Debug)]
pub(super) struct ScriptedClassifier {
    verdict: Result<Vec<RankedLabel>, ClassifierUnavailable>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedClassifier {
    pub(super) fn ranked(labels: &[(&str, f64)]) -> Self {
        Self::with_verdict(Ok(labels
            .iter()
            .map(|(label, score)| RankedLabel {
                label: label.to_string(),
                score: *score,
            })
            .collect()))
    }

    pub(super) fn unavailable(reason: ClassifierUnavailable) -> Self {
        Self::with_verdict(Err(reason))
    }

    fn with_verdict(verdict: Result<Vec<RankedLabel>, ClassifierUnavailable>) -> Self {
        Self {
            verdict,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }
}

impl FallbackClassifier for ScriptedClassifier {
    fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
    ) -> Result<Vec<RankedLabel>, ClassifierUnavailable> {
        self.calls.lock().expect("calls mutex poisoned").push((
            text.to_string(),
            candidate_labels.iter().map(|label| label.to_string()).collect(),
        ));
        self.verdict.clone()
    }
}

pub(super) fn knowledge() -> Arc<KnowledgeBase> {
    Arc::new(KnowledgeBase::standard())
}

pub(super) fn classifier_with(fallback: Arc<ScriptedClassifier>) -> ContextClassifier {
    ContextClassifier::new(knowledge(), fallback)
}

pub(super) fn analyze(classifier: &ContextClassifier, description: &str) -> ContextAnalysis {
    classifier.analyze(&DeliveryInput::new(description))
}

pub(super) fn pipeline_with(fallback: Arc<ScriptedClassifier>) -> TriagePipeline {
    TriagePipeline::new(KnowledgeBase::standard(), fallback)
}

pub(super) fn keyword_context(domain: DomainCategory, keywords: &[&str]) -> ContextAnalysis {
    ContextAnalysis {
        domain,
        detected_keywords: keywords.iter().map(|word| word.to_string()).collect(),
        is_human_dependent: domain.is_human_dependent(),
        source: ContextSource::KeywordMatch,
        fallback: FallbackAttempt::NotAttempted,
    }
}

pub(super) fn default_context() -> ContextAnalysis {
    ContextAnalysis {
        domain: DomainCategory::General,
        detected_keywords: Vec::new(),
        is_human_dependent: false,
        source: ContextSource::Default,
        fallback: FallbackAttempt::Unavailable {
            reason: ClassifierUnavailable::Disabled.to_string(),
        },
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
