//! Gate trait and common helpers.

use super::types::{EngineOptions, Stage};
use crate::answers::AnswerSet;
use crate::decision_log::DecisionLog;
use crate::verdict::Verdict;

pub const SELECT_TO_CONTINUE: &str = "Select an option to continue the assessment.";
pub const SEEK_LEGAL_CONSULTATION: &str = "Seek legal consultation to confirm this assessment.";

/// One stage of the checklist. Gates read answers, append to the run's log and
/// either let the flow continue or stop it.
pub trait Gate {
    fn stage(&self) -> Stage;
    fn evaluate(&self, answers: &AnswerSet, ctx: &mut GateContext<'_>) -> GateResult;
}

pub struct GateContext<'a> {
    pub options: &'a EngineOptions,
    pub log: &'a mut DecisionLog,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateResult {
    Proceed,
    Awaiting { stage: Stage, message: String },
    Conflict { stage: Stage, message: String },
    Terminate(Termination),
}

impl GateResult {
    pub(crate) fn awaiting(stage: Stage, message: impl Into<String>) -> Self {
        GateResult::Awaiting {
            stage,
            message: message.into(),
        }
    }

    pub(crate) fn conflict(stage: Stage, message: impl Into<String>) -> Self {
        GateResult::Conflict {
            stage,
            message: message.into(),
        }
    }
}

/// Verdict reached by a gate plus what goes into the final log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Termination {
    pub verdict: Verdict,
    pub rationale: Vec<String>,
    /// Notes for the "Final verdict" entry; the rationale when absent
    pub final_notes: Option<Vec<String>>,
}

impl Termination {
    pub fn new(verdict: Verdict, rationale: Vec<String>) -> Self {
        Self {
            verdict,
            rationale,
            final_notes: None,
        }
    }

    pub fn with_final_notes(mut self, notes: Vec<String>) -> Self {
        self.final_notes = Some(notes);
        self
    }
}

pub(crate) fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
