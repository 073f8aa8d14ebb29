use super::domain::{PendingDecision, PriorityLevel};

pub const OVERSIGHT_NOTICE: &str =
    "[SAFETY INTERVENTION]: Human approval required for Priority 1 dispatch.";

/// Renders the advisory justification for a decision whose priority is already fixed.
///
/// Output is deterministic: the same pending decision always yields the same text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplanationGenerator;

impl ExplanationGenerator {
    pub fn rationale(priority: PriorityLevel) -> &'static str {
        match priority {
            PriorityLevel::Critical => {
                "CRITICAL PRIORITY assigned due to high ethical risk score indicating potential severe harm or vulnerability."
            }
            PriorityLevel::High => {
                "HIGH PRIORITY assigned based on elevated importance compared to general goods."
            }
            PriorityLevel::Standard => {
                "STANDARD PRIORITY assigned. No immediate ethical risks detected."
            }
        }
    }

    pub fn render(&self, decision: &PendingDecision) -> String {
        let context = &decision.context;
        let risk = &decision.risk;
        let score = &decision.score;

        let context_line = if context.detected_keywords.is_empty() {
            format!(
                "No domain keywords detected; package assigned the default {} classification.",
                context.domain
            )
        } else {
            format!(
                "Package contained keywords ({}) associated with the {} domain.",
                context.detected_keywords.join(", "),
                context.domain
            )
        };

        let mut lines = vec![
            "DECISION EXPLANATION:".to_string(),
            context_line,
            "Risk Profile assessed as:".to_string(),
            format!(
                "  - Harm Potential: {}/10 (Weight: {:.1})",
                risk.harm_severity, score.harm_score
            ),
            format!(
                "  - Vulnerability: {}/10 (Weight: {:.1})",
                risk.vulnerability, score.vulnerability_score
            ),
            format!(
                "  - Time Sensitivity: {}/10 (Weight: {:.1})",
                risk.time_sensitivity, score.time_score
            ),
            format!("Total Ethical Score: {:.2}", score.total_score),
            format!("CONCLUSION: {}", Self::rationale(decision.priority_level)),
        ];

        if decision.requires_approval {
            lines.push(OVERSIGHT_NOTICE.to_string());
        }

        lines.join("\n")
    }
}
