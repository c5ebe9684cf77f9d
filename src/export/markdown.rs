//! Markdown decision-log export

use crate::engine::Assessment;

pub const TITLE: &str = "# AI System Classification Summary";

pub fn generate(assessment: &Assessment) -> String {
    let mut lines: Vec<String> = vec![
        TITLE.to_string(),
        String::new(),
        format!("**Result:** {}", assessment.result),
        String::new(),
        "## Rationale".to_string(),
    ];
    lines.extend(assessment.rationale.iter().map(|item| format!("- {item}")));
    lines.push(String::new());
    lines.push("## Decision log".to_string());

    for entry in &assessment.decision_log {
        lines.push(format!("### {}", entry.step));
        lines.push(format!("- **Outcome:** {}", entry.outcome));
        lines.push(format!("- **Recorded at:** {}", entry.timestamp));
        lines.push("- **Notes:**".to_string());
        lines.extend(
            entry
                .display_notes()
                .into_iter()
                .map(|note| format!("  - {note}")),
        );
        lines.push(String::new());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::AnswerSet;
    use crate::decision_log::{DecisionLogEntry, NO_NOTES};
    use crate::verdict::Verdict;

    #[test]
    fn test_sections_and_placeholder_notes() {
        let assessment = Assessment {
            result: Verdict::LikelyAISystem,
            rationale: vec!["first".into(), "second".into()],
            answers: AnswerSet::default(),
            decision_log: vec![DecisionLogEntry {
                step: "Step 2 — AI techniques".into(),
                outcome: "Generation behaviours observed".into(),
                notes: vec![],
                timestamp: "2026-01-01T00:00:00.000000Z".into(),
            }],
        };

        let md = generate(&assessment);
        let lines: Vec<&str> = md.lines().collect();
        assert_eq!(lines[0], TITLE);
        assert_eq!(lines[2], "**Result:** Likely an AI system");
        assert_eq!(lines[4], "## Rationale");
        assert_eq!(lines[5], "- first");
        assert_eq!(lines[6], "- second");
        assert_eq!(lines[8], "## Decision log");
        assert_eq!(lines[9], "### Step 2 — AI techniques");
        assert_eq!(lines[10], "- **Outcome:** Generation behaviours observed");
        assert_eq!(lines[11], "- **Recorded at:** 2026-01-01T00:00:00.000000Z");
        assert_eq!(lines[12], "- **Notes:**");
        assert_eq!(lines[13], format!("  - {NO_NOTES}"));
    }
}
