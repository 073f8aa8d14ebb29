use super::super::domain::{EthicalScore, RiskProfile};
use super::super::knowledge::ScoringWeights;

/// Rounds to two decimal places on the exact stored value, ties to even.
///
/// `2.675` is stored slightly below the tie and rounds down to `2.67`; `0.125` is an
/// exact tie and rounds to the even `0.12`.
pub fn round_to_cents(value: f64) -> f64 {
    // float formatting rounds the exact binary expansion, unlike `(value * 100.0).round()`
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Multiplies each risk axis by its weight and sums the contributions.
#[derive(Debug, Clone, Copy)]
pub struct EthicalScoringEngine {
    weights: ScoringWeights,
}

impl EthicalScoringEngine {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn score(&self, risk: &RiskProfile) -> EthicalScore {
        let harm_score = f64::from(risk.harm_severity) * self.weights.harm;
        let vulnerability_score = f64::from(risk.vulnerability) * self.weights.vulnerability;
        let time_score = f64::from(risk.time_sensitivity) * self.weights.time;

        EthicalScore {
            harm_score,
            vulnerability_score,
            time_score,
            total_score: round_to_cents(harm_score + vulnerability_score + time_score),
        }
    }
}
