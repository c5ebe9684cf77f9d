//! Types for engine outcomes, evaluations and the exported assessment.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::answers::AnswerSet;
use crate::decision_log::DecisionLogEntry;
use crate::verdict::Verdict;

/// Questionnaire stages, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Stage A: exclusion categories
    NegativeScope,
    /// Stage B: AI techniques used to build the solution
    AiTechniques,
    /// Stage B fallback when techniques cannot be verified
    UnableToVerify,
    /// Stage C: optimization-only carve-out
    OptimizationCarveOut,
}

impl Stage {
    /// Step heading used in the decision log
    pub fn step_name(&self) -> &'static str {
        match self {
            Stage::NegativeScope => "Step 1 — Negative scope check",
            Stage::AiTechniques | Stage::UnableToVerify => "Step 2 — AI techniques",
            Stage::OptimizationCarveOut => "Step 3 — Optimization carve-out",
        }
    }

    /// Session state while this stage waits for answers
    pub fn awaiting_state(&self) -> SessionState {
        match self {
            Stage::NegativeScope => SessionState::AwaitingStageA,
            Stage::AiTechniques => SessionState::AwaitingStageB,
            Stage::UnableToVerify => SessionState::AwaitingStageBUnableSub,
            Stage::OptimizationCarveOut => SessionState::AwaitingStageC,
        }
    }
}

/// Where a session stands. Transitions only move forward or to `Terminal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    AwaitingStageA,
    AwaitingStageB,
    AwaitingStageBUnableSub,
    AwaitingStageC,
    Terminal { verdict: Verdict },
}

impl SessionState {
    /// Stable snake_case name, as used in serialized evaluations
    pub fn code(&self) -> &'static str {
        match self {
            SessionState::AwaitingStageA => "awaiting_stage_a",
            SessionState::AwaitingStageB => "awaiting_stage_b",
            SessionState::AwaitingStageBUnableSub => "awaiting_stage_b_unable_sub",
            SessionState::AwaitingStageC => "awaiting_stage_c",
            SessionState::Terminal { .. } => "terminal",
        }
    }

    /// Last stage fully completed before reaching this state
    pub fn passed_stage(&self) -> Option<Stage> {
        match self {
            SessionState::AwaitingStageA | SessionState::Terminal { .. } => None,
            SessionState::AwaitingStageB | SessionState::AwaitingStageBUnableSub => {
                Some(Stage::NegativeScope)
            }
            SessionState::AwaitingStageC => Some(Stage::AiTechniques),
        }
    }
}

/// Result of one evaluation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Required answers missing; re-prompt `stage`
    AwaitingInput { stage: Stage, message: String },
    /// Mutually exclusive selections; re-render `stage` with the advisory
    ConflictingInput { stage: Stage, message: String },
    Terminal { verdict: Verdict },
}

/// What the engine hands back to the rendering collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub outcome: Outcome,
    pub rationale: Vec<String>,
    pub log_entries: Vec<DecisionLogEntry>,
}

impl Evaluation {
    pub fn state(&self) -> SessionState {
        match &self.outcome {
            Outcome::AwaitingInput { stage, .. } | Outcome::ConflictingInput { stage, .. } => {
                stage.awaiting_state()
            }
            Outcome::Terminal { verdict } => SessionState::Terminal { verdict: *verdict },
        }
    }

    pub fn verdict(&self) -> Option<Verdict> {
        match self.outcome {
            Outcome::Terminal { verdict } => Some(verdict),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.outcome, Outcome::Terminal { .. })
    }

    pub fn is_conflicting(&self) -> bool {
        matches!(self.outcome, Outcome::ConflictingInput { .. })
    }

    /// Message to show when the caller must re-prompt
    pub fn advisory(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::AwaitingInput { message, .. } | Outcome::ConflictingInput { message, .. } => {
                Some(message)
            }
            Outcome::Terminal { .. } => None,
        }
    }

    /// Build the exportable record; `None` until the run is terminal
    pub fn assessment(&self, answers: &AnswerSet) -> Option<Assessment> {
        let result = self.verdict()?;
        Some(Assessment {
            result,
            rationale: self.rationale.clone(),
            answers: answers.clone(),
            decision_log: self.log_entries.clone(),
        })
    }
}

/// Serialized as `{state, verdict, advisory, outcome, rationale, log_entries}`;
/// `state`, `verdict` and `advisory` are derived from the outcome.
impl Serialize for Evaluation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_struct("Evaluation", 6)?;
        out.serialize_field("state", self.state().code())?;
        out.serialize_field("verdict", &self.verdict())?;
        out.serialize_field("advisory", &self.advisory())?;
        out.serialize_field("outcome", &self.outcome)?;
        out.serialize_field("rationale", &self.rationale)?;
        out.serialize_field("log_entries", &self.log_entries)?;
        out.end()
    }
}

/// Terminal output consumed by the serializers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub result: Verdict,
    pub rationale: Vec<String>,
    pub answers: AnswerSet,
    pub decision_log: Vec<DecisionLogEntry>,
}

/// What to do when machine learning is ticked but no technique is listed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechniqueListPolicy {
    /// Accept and note that details were not specified
    #[default]
    Permissive,
    /// Ask for at least one technique before proceeding
    Strict,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    pub technique_list_policy: TechniqueListPolicy,
}
