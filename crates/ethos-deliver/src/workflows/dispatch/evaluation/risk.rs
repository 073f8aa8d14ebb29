use std::sync::Arc;

use super::super::domain::{DomainCategory, RiskProfile};
use super::super::knowledge::KnowledgeBase;

/// Looks up the base risk triple for a domain.
#[derive(Debug, Clone)]
pub struct RiskEstimator {
    knowledge: Arc<KnowledgeBase>,
}

impl RiskEstimator {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge }
    }

    pub fn estimate(&self, domain: DomainCategory) -> RiskProfile {
        self.knowledge.base_risk(domain)
    }
}
