use std::sync::Arc;

use tracing::{info, info_span, warn};

use super::classifier::{ContextClassifier, DisabledClassifier, FallbackClassifier};
use super::domain::{DeliveryDecision, DeliveryInput, PendingDecision};
use super::evaluation::{round_to_cents, DecisionEngine, EthicalScoringEngine, RiskEstimator};
use super::explanation::ExplanationGenerator;
use super::knowledge::KnowledgeBase;

/// Structural failures that abort a triage request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    #[error("decision invariant violated: {0}")]
    Invariant(String),
}

const SCORE_TOLERANCE: f64 = 1e-9;

/// Composes the context, risk, scoring, decision and explanation stages.
///
/// The pipeline holds no per-request state and can be shared across threads.
#[derive(Debug, Clone)]
pub struct TriagePipeline {
    classifier: ContextClassifier,
    risk: RiskEstimator,
    scoring: EthicalScoringEngine,
    decisions: DecisionEngine,
    explanations: ExplanationGenerator,
}

impl TriagePipeline {
    pub fn new(knowledge: KnowledgeBase, fallback: Arc<dyn FallbackClassifier>) -> Self {
        let knowledge = Arc::new(knowledge);
        Self {
            classifier: ContextClassifier::new(knowledge.clone(), fallback),
            risk: RiskEstimator::new(knowledge.clone()),
            scoring: EthicalScoringEngine::new(knowledge.weights()),
            decisions: DecisionEngine::new(knowledge.thresholds()),
            explanations: ExplanationGenerator,
        }
    }

    /// Standard tables with the fallback classifier switched off.
    pub fn rules_only() -> Self {
        Self::new(KnowledgeBase::standard(), Arc::new(DisabledClassifier))
    }

    /// Triage a description; missing route endpoints default to `"N/A"`.
    pub fn process(
        &self,
        description: &str,
        pickup: Option<&str>,
        dropoff: Option<&str>,
    ) -> Result<DeliveryDecision, PipelineError> {
        self.evaluate(&DeliveryInput::with_route(description, pickup, dropoff))
    }

    pub fn evaluate(&self, input: &DeliveryInput) -> Result<DeliveryDecision, PipelineError> {
        let span = info_span!("triage", pickup = %input.pickup, dropoff = %input.dropoff);
        let _entered = span.enter();

        let result = self.run_stages(input);
        match &result {
            Ok(decision) => info!(
                priority = decision.priority_level.level(),
                requires_approval = decision.requires_approval,
                domain = %decision.context.domain,
                total_score = decision.score.total_score,
                "delivery triaged"
            ),
            Err(err) => warn!(error = %err, "delivery triage failed"),
        }
        result
    }

    fn run_stages(&self, input: &DeliveryInput) -> Result<DeliveryDecision, PipelineError> {
        let context = self.classifier.analyze(input);
        let risk = self.risk.estimate(context.domain);
        let score = self.scoring.score(&risk);
        let pending = self.decisions.decide(score, context, risk);
        verify_pending(&pending)?;

        let explanation = self.explanations.render(&pending);
        if explanation.trim().is_empty() {
            return Err(PipelineError::Invariant(
                "explanation rendered empty".to_string(),
            ));
        }

        Ok(pending.finalize(explanation))
    }
}

fn verify_pending(pending: &PendingDecision) -> Result<(), PipelineError> {
    if !pending.risk.within_scale() {
        return Err(PipelineError::Invariant(format!(
            "risk axes {:?} outside 0..=10",
            pending.risk
        )));
    }

    let score = &pending.score;
    let axes = [score.harm_score, score.vulnerability_score, score.time_score];
    if axes
        .iter()
        .chain(std::iter::once(&score.total_score))
        .any(|value| !value.is_finite())
    {
        return Err(PipelineError::Invariant(format!(
            "non-finite ethical score {score:?}"
        )));
    }

    let expected = round_to_cents(axes.iter().sum());
    if (expected - score.total_score).abs() > SCORE_TOLERANCE {
        return Err(PipelineError::Invariant(format!(
            "total score {} does not match axis sum {}",
            score.total_score, expected
        )));
    }

    Ok(())
}
