mod policy;
mod risk;
mod scoring;

pub use policy::DecisionEngine;
pub use risk::RiskEstimator;
pub use scoring::{round_to_cents, EthicalScoringEngine};
