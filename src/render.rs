//! Plain-text rendering of evaluations for terminals

use crate::engine::{Evaluation, Outcome};
use crate::verdict::{Verdict, VerdictTone};

/// One-line badge for a verdict, styled by its tone
pub fn badge(verdict: Verdict) -> String {
    let icon = match verdict.tone() {
        VerdictTone::Success => "✅",
        VerdictTone::Info => "ℹ️",
        VerdictTone::Warning => "⚠️",
    };
    format!("{icon} Result: {verdict}")
}

/// Full human-readable summary: badge or advisory, rationale, decision log
pub fn summary(evaluation: &Evaluation) -> String {
    let mut out = String::new();

    match &evaluation.outcome {
        Outcome::Terminal { verdict } => {
            out.push_str(&badge(*verdict));
            out.push('\n');
        }
        Outcome::AwaitingInput { stage, message } => {
            out.push_str(&format!("… Awaiting input for {}: {message}\n", stage.step_name()));
        }
        Outcome::ConflictingInput { stage, message } => {
            out.push_str(&format!("⚠️ Conflicting input in {}: {message}\n", stage.step_name()));
        }
    }

    if !evaluation.rationale.is_empty() {
        out.push_str("\nRationale\n");
        for item in &evaluation.rationale {
            out.push_str(&format!("- {item}\n"));
        }
    }

    if !evaluation.log_entries.is_empty() {
        out.push_str("\nDecision log\n");
        for entry in &evaluation.log_entries {
            out.push_str(&format!("{} — {}\n", entry.step, entry.outcome));
            for note in entry.display_notes() {
                out.push_str(&format!("  - {note}\n"));
            }
            out.push_str(&format!("  Recorded at {}\n", entry.timestamp));
        }
    }

    out
}
