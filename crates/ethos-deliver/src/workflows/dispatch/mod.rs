//! Dispatch triage workflow: description -> context -> risk -> score -> decision -> explanation.

pub mod classifier;
pub mod domain;
pub mod evaluation;
pub mod explanation;
pub mod knowledge;
pub mod pipeline;
pub mod router;

#[cfg(test)]
mod tests;

pub use classifier::{
    ClassifierUnavailable, ContextClassifier, DisabledClassifier, FallbackClassifier,
    HuggingFaceClassifier, RankedLabel, MODEL_CLASSIFIED_MARKER,
};
pub use domain::{
    ContextAnalysis, ContextSource, DecisionView, DeliveryDecision, DeliveryInput,
    DomainCategory, EthicalScore, FallbackAttempt, PendingDecision, PriorityLevel, RiskProfile,
};
pub use evaluation::{DecisionEngine, EthicalScoringEngine, RiskEstimator};
pub use explanation::ExplanationGenerator;
pub use knowledge::{KnowledgeBase, PriorityThresholds, ScoringWeights};
pub use pipeline::{PipelineError, TriagePipeline};
pub use router::{dispatch_router, TriageRequest};
