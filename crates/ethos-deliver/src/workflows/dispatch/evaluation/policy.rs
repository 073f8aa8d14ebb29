use super::super::domain::{
    ContextAnalysis, EthicalScore, PendingDecision, PriorityLevel, RiskProfile,
};
use super::super::knowledge::PriorityThresholds;

/// Applies the inclusive priority thresholds to a total score.
#[derive(Debug, Clone, Copy)]
pub struct DecisionEngine {
    thresholds: PriorityThresholds,
}

impl DecisionEngine {
    pub fn new(thresholds: PriorityThresholds) -> Self {
        Self { thresholds }
    }

    pub fn priority_for(&self, total_score: f64) -> PriorityLevel {
        if total_score >= self.thresholds.critical {
            PriorityLevel::Critical
        } else if total_score >= self.thresholds.high {
            PriorityLevel::High
        } else {
            PriorityLevel::Standard
        }
    }

    pub fn decide(
        &self,
        score: EthicalScore,
        context: ContextAnalysis,
        risk: RiskProfile,
    ) -> PendingDecision {
        let priority_level = self.priority_for(score.total_score);

        PendingDecision {
            priority_level,
            // critical dispatches always go through a human
            requires_approval: priority_level == PriorityLevel::Critical,
            context,
            risk,
            score,
        }
    }
}
