mod hugging_face;

pub use hugging_face::HuggingFaceClassifier;

use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::domain::{
    ContextAnalysis, ContextSource, DeliveryInput, DomainCategory, FallbackAttempt,
};
use super::knowledge::KnowledgeBase;

/// Keyword entry recorded when the domain came from the fallback model rather than a rule.
pub const MODEL_CLASSIFIED_MARKER: &str = "(model classified)";

/// One candidate label with the confidence the classifier assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedLabel {
    pub label: String,
    pub score: f64,
}

/// Reasons the fallback classifier could not produce a verdict.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifierUnavailable {
    #[error("classifier credential not configured")]
    MissingCredential,
    #[error("fallback classification disabled")]
    Disabled,
    #[error("classifier request timed out")]
    Timeout,
    #[error("classifier transport failed: {0}")]
    Transport(String),
    #[error("classifier returned HTTP {0}")]
    Status(u16),
    #[error("classifier response malformed: {0}")]
    MalformedResponse(String),
    #[error("classifier returned unknown label '{0}'")]
    UnknownLabel(String),
}

/// Zero-shot text classification capability consulted when no keyword rule matches.
///
/// Implementations return labels ranked best-first, or say explicitly why they
/// could not answer. They must not have side effects visible to the caller.
pub trait FallbackClassifier: Send + Sync + Debug {
    fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
    ) -> Result<Vec<RankedLabel>, ClassifierUnavailable>;
}

/// Fallback used when no credential is configured; always reports itself unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledClassifier;

impl FallbackClassifier for DisabledClassifier {
    fn classify(
        &self,
        _text: &str,
        _candidate_labels: &[&str],
    ) -> Result<Vec<RankedLabel>, ClassifierUnavailable> {
        Err(ClassifierUnavailable::Disabled)
    }
}

/// Maps a description to a domain using ordered keyword rules, then the fallback model.
#[derive(Debug, Clone)]
pub struct ContextClassifier {
    knowledge: Arc<KnowledgeBase>,
    fallback: Arc<dyn FallbackClassifier>,
}

impl ContextClassifier {
    pub fn new(knowledge: Arc<KnowledgeBase>, fallback: Arc<dyn FallbackClassifier>) -> Self {
        Self {
            knowledge,
            fallback,
        }
    }

    pub fn analyze(&self, input: &DeliveryInput) -> ContextAnalysis {
        let normalized = input.description.to_lowercase();

        if let Some((domain, keywords)) = self.match_keywords(&normalized) {
            debug!(%domain, ?keywords, "keyword rule matched");
            return ContextAnalysis {
                domain,
                detected_keywords: keywords,
                is_human_dependent: domain.is_human_dependent(),
                source: ContextSource::KeywordMatch,
                fallback: FallbackAttempt::NotAttempted,
            };
        }

        let fallback = self.consult_fallback(&normalized);
        let (domain, detected_keywords, source) = match &fallback {
            FallbackAttempt::Adopted { label, .. } => (
                *label,
                vec![MODEL_CLASSIFIED_MARKER.to_string()],
                ContextSource::ModelFallback,
            ),
            _ => (DomainCategory::General, Vec::new(), ContextSource::Default),
        };

        ContextAnalysis {
            domain,
            detected_keywords,
            is_human_dependent: domain.is_human_dependent(),
            source,
            fallback,
        }
    }

    /// First domain in priority order with any matching keyword, and every keyword it matched.
    fn match_keywords(&self, normalized: &str) -> Option<(DomainCategory, Vec<String>)> {
        self.knowledge
            .domain_priority()
            .iter()
            .find_map(|domain| {
                let found: Vec<String> = self
                    .knowledge
                    .keywords_for(*domain)
                    .iter()
                    .filter(|keyword| normalized.contains(keyword.as_str()))
                    .cloned()
                    .collect();
                (!found.is_empty()).then_some((*domain, found))
            })
    }

    fn consult_fallback(&self, normalized: &str) -> FallbackAttempt {
        let labels: Vec<&str> = DomainCategory::ALL
            .iter()
            .map(|domain| domain.label())
            .collect();

        let verdict = self
            .fallback
            .classify(normalized, &labels)
            .and_then(|ranked| best_domain(&ranked));

        match verdict {
            Ok((DomainCategory::General, confidence)) => {
                debug!(confidence, "fallback classifier returned GENERAL");
                FallbackAttempt::ReturnedGeneral { confidence }
            }
            Ok((label, confidence)) => {
                info!(%label, confidence, "adopting fallback classifier verdict");
                FallbackAttempt::Adopted { label, confidence }
            }
            Err(reason) => {
                warn!(%reason, "fallback classification skipped");
                FallbackAttempt::Unavailable {
                    reason: reason.to_string(),
                }
            }
        }
    }
}

fn best_domain(ranked: &[RankedLabel]) -> Result<(DomainCategory, f64), ClassifierUnavailable> {
    let best = ranked
        .iter()
        .filter(|candidate| candidate.score.is_finite())
        .reduce(|best, candidate| {
            // ties keep the earlier, higher-ranked entry
            if candidate.score > best.score {
                candidate
            } else {
                best
            }
        })
        .ok_or_else(|| ClassifierUnavailable::MalformedResponse("no ranked labels".to_string()))?;

    DomainCategory::from_label(&best.label)
        .map(|domain| (domain, best.score))
        .ok_or_else(|| ClassifierUnavailable::UnknownLabel(best.label.clone()))
}
