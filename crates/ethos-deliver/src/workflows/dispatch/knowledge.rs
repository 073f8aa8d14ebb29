use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{DomainCategory, RiskProfile};

/// Per-axis multipliers applied to a [`RiskProfile`].
///
/// The weights are expected to sum to 1.0 so totals stay on the 0-10 scale, but
/// nothing enforces it: a different sum is a policy choice, not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub harm: f64,
    pub vulnerability: f64,
    pub time: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            harm: 0.4,
            vulnerability: 0.35,
            time: 0.25,
        }
    }
}

/// Inclusive lower bounds for priority 1 (`critical`) and priority 2 (`high`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorityThresholds {
    pub critical: f64,
    pub high: f64,
}

impl Default for PriorityThresholds {
    fn default() -> Self {
        Self {
            critical: 8.0,
            high: 6.0,
        }
    }
}

/// Immutable rule tables consulted by the classifier and the evaluation stages.
///
/// `domain_priority` is the explicit tie-break order for keyword matching: the
/// first domain in the list with any matching keyword wins, so a description that
/// mentions both medical and essential goods is always classified by whichever
/// comes first here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    domain_priority: Vec<DomainCategory>,
    keywords: BTreeMap<DomainCategory, Vec<String>>,
    base_risk: BTreeMap<DomainCategory, RiskProfile>,
    weights: ScoringWeights,
    thresholds: PriorityThresholds,
}

impl KnowledgeBase {
    pub fn standard() -> Self {
        Self::empty()
            .with_keywords(
                DomainCategory::Medical,
                [
                    "medicine",
                    "insulin",
                    "blood",
                    "organ",
                    "vaccine",
                    "pharmacy",
                    "doctor",
                    "hospital",
                    "prescription",
                    "heart",
                    "kidney",
                    "monitor",
                    "oxygen",
                ],
            )
            .with_keywords(
                DomainCategory::Emergency,
                [
                    "disaster",
                    "flood",
                    "fire",
                    "rescue",
                    "relief",
                    "urgency",
                    "critical",
                    "collapsed",
                    "search",
                    "evacuation",
                ],
            )
            .with_keywords(
                DomainCategory::Essential,
                [
                    "food", "water", "grocery", "baby", "diaper", "sanitary", "heating", "repair",
                    "plumbing",
                ],
            )
            .with_base_risk(DomainCategory::Medical, RiskProfile::new(9, 9, 8))
            .with_base_risk(DomainCategory::Emergency, RiskProfile::new(8, 9, 9))
            .with_base_risk(DomainCategory::Essential, RiskProfile::new(4, 5, 4))
            .with_base_risk(DomainCategory::General, RiskProfile::new(1, 1, 1))
    }

    /// Tables with the standard domain order, default weights and thresholds, and no rules.
    pub fn empty() -> Self {
        Self {
            domain_priority: vec![
                DomainCategory::Medical,
                DomainCategory::Emergency,
                DomainCategory::Essential,
            ],
            keywords: BTreeMap::new(),
            base_risk: BTreeMap::new(),
            weights: ScoringWeights::default(),
            thresholds: PriorityThresholds::default(),
        }
    }

    /// Replaces the trigger words for `domain`. Words are stored case-folded.
    pub fn with_keywords<I, S>(mut self, domain: DomainCategory, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();
        self.keywords.insert(domain, words);
        self
    }

    pub fn with_base_risk(mut self, domain: DomainCategory, risk: RiskProfile) -> Self {
        self.base_risk.insert(domain, risk);
        self
    }

    pub fn with_domain_priority(mut self, order: Vec<DomainCategory>) -> Self {
        self.domain_priority = order;
        self
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_thresholds(mut self, thresholds: PriorityThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn domain_priority(&self) -> &[DomainCategory] {
        &self.domain_priority
    }

    pub fn keywords_for(&self, domain: DomainCategory) -> &[String] {
        self.keywords
            .get(&domain)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Base risk for `domain`, `(1, 1, 1)` when the table has no entry.
    pub fn base_risk(&self, domain: DomainCategory) -> RiskProfile {
        self.base_risk.get(&domain).copied().unwrap_or_default()
    }

    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    pub fn thresholds(&self) -> PriorityThresholds {
        self.thresholds
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::standard()
    }
}
