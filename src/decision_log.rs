//! Append-only audit trail of each stage's recorded outcome

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const NO_NOTES: &str = "No additional notes recorded.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionLogEntry {
    pub step: String,
    pub outcome: String,
    #[serde(default)]
    pub notes: Vec<String>,
    /// ISO-8601 UTC, `Z`-suffixed
    pub timestamp: String,
}

impl DecisionLogEntry {
    /// Notes for display; falls back to a placeholder when none were recorded
    pub fn display_notes(&self) -> Vec<&str> {
        if self.notes.is_empty() {
            vec![NO_NOTES]
        } else {
            self.notes.iter().map(String::as_str).collect()
        }
    }
}

/// Decision log for a single evaluation run.
///
/// Entries can only be appended; the log is created empty at the start of
/// every run and handed to the caller when the run ends.
#[derive(Debug, Clone, Default)]
pub struct DecisionLog {
    entries: Vec<DecisionLogEntry>,
}

impl DecisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record<S, O>(&mut self, step: S, outcome: O, notes: Vec<String>) -> &DecisionLogEntry
    where
        S: Into<String>,
        O: Into<String>,
    {
        let entry = DecisionLogEntry {
            step: step.into(),
            outcome: outcome.into(),
            notes,
            timestamp: utc_timestamp(),
        };
        tracing::debug!(step = %entry.step, outcome = %entry.outcome, "decision recorded");
        self.entries.push(entry);
        // just pushed
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[DecisionLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<DecisionLogEntry> {
        self.entries
    }
}

/// Current time as an ISO-8601 UTC string ending in `Z`
pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
