//! Ethics-driven delivery triage.
//!
//! A free-text package description flows through context classification, risk
//! estimation, weighted ethical scoring, and a threshold decision. Every decision
//! carries the explanation needed to trace it back to the inputs that produced it.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
