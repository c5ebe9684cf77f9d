//! Classification engine: the three gated checklist stages.
//! Deterministic and stateless; every call starts a fresh decision log.

pub mod gate;
pub mod optimization;
pub mod scope;
pub mod techniques;
pub mod types;

use gate::{Gate, GateContext, GateResult};
use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::answers::AnswerSet;
use crate::decision_log::DecisionLog;

pub use types::{
    Assessment, EngineOptions, Evaluation, Outcome, SessionState, Stage, TechniqueListPolicy,
};

pub const FINAL_VERDICT_STEP: &str = "Final verdict";

static GATES: Lazy<Vec<Arc<dyn Gate + Send + Sync>>> = Lazy::new(|| {
    vec![
        Arc::new(scope::NegativeScopeGate),
        Arc::new(techniques::AiTechniqueGate),
        Arc::new(optimization::OptimizationGate),
    ]
});

/// Runs the gates in order A → B → C and stops at the first gate that does not proceed.
#[derive(Clone)]
pub struct ClassificationEngine {
    options: EngineOptions,
    gates: Vec<Arc<dyn Gate + Send + Sync>>, // shared trait objects
}

impl Default for ClassificationEngine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl ClassificationEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            options,
            gates: GATES.clone(),
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Evaluate a complete or partial answer set through all stages.
    pub fn evaluate(&self, answers: &AnswerSet) -> Evaluation {
        self.evaluate_until(answers, Stage::OptimizationCarveOut)
    }

    /// Evaluate stages up to and including `last`.
    ///
    /// When every evaluated stage proceeds, the result awaits input for the next
    /// stage. This is how an incremental form provider walks the questionnaire
    /// one step at a time.
    pub fn evaluate_until(&self, answers: &AnswerSet, last: Stage) -> Evaluation {
        let mut log = DecisionLog::new();

        for gate in &self.gates {
            let stage = gate.stage();
            if stage > last {
                tracing::debug!(?stage, "stopping before stage");
                return Evaluation {
                    outcome: Outcome::AwaitingInput {
                        stage,
                        message: format!("Continue with {}.", stage.step_name()),
                    },
                    rationale: Vec::new(),
                    log_entries: log.into_entries(),
                };
            }

            let mut ctx = GateContext {
                options: &self.options,
                log: &mut log,
            };
            match gate.evaluate(answers, &mut ctx) {
                GateResult::Proceed => {
                    tracing::debug!(?stage, "stage passed");
                }
                GateResult::Awaiting { stage, message } => {
                    tracing::debug!(?stage, %message, "awaiting input");
                    return Evaluation {
                        outcome: Outcome::AwaitingInput { stage, message },
                        rationale: Vec::new(),
                        log_entries: log.into_entries(),
                    };
                }
                GateResult::Conflict { stage, message } => {
                    tracing::warn!(?stage, %message, "conflicting input");
                    return Evaluation {
                        outcome: Outcome::ConflictingInput { stage, message },
                        rationale: Vec::new(),
                        log_entries: log.into_entries(),
                    };
                }
                GateResult::Terminate(termination) => {
                    let verdict = termination.verdict;
                    let notes = termination
                        .final_notes
                        .unwrap_or_else(|| termination.rationale.clone());
                    log.record(FINAL_VERDICT_STEP, verdict.label(), notes);
                    tracing::info!(?stage, verdict = verdict.code(), "classification complete");
                    return Evaluation {
                        outcome: Outcome::Terminal { verdict },
                        rationale: termination.rationale,
                        log_entries: log.into_entries(),
                    };
                }
            }
        }

        // The optimization gate always terminates, so running off the end means
        // the gate list itself is broken.
        tracing::error!("gate list ended without a verdict");
        Evaluation {
            outcome: Outcome::AwaitingInput {
                stage: Stage::OptimizationCarveOut,
                message: gate::SELECT_TO_CONTINUE.to_string(),
            },
            rationale: Vec::new(),
            log_entries: log.into_entries(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{AiTechniques, NonAiCategories};
    use crate::verdict::Verdict;

    fn past_stage_a() -> AnswerSet {
        AnswerSet {
            non_ai_categories: NonAiCategories {
                none_applies: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_answers_await_stage_a() {
        let eval = ClassificationEngine::default().evaluate(&AnswerSet::default());
        assert_eq!(eval.state(), SessionState::AwaitingStageA);
        assert!(eval.log_entries.is_empty());
        assert!(eval.rationale.is_empty());
    }

    #[test]
    fn test_evaluate_until_stops_between_stages() {
        let engine = ClassificationEngine::default();
        let eval = engine.evaluate_until(&past_stage_a(), Stage::NegativeScope);
        assert_eq!(eval.state(), SessionState::AwaitingStageB);
        assert_eq!(eval.log_entries.len(), 1);

        let mut answers = past_stage_a();
        answers.ai_techniques = AiTechniques {
            ml_selected: true,
            ..Default::default()
        };
        let eval = engine.evaluate_until(&answers, Stage::AiTechniques);
        assert_eq!(eval.state(), SessionState::AwaitingStageC);
        assert_eq!(eval.log_entries.len(), 2);
    }

    #[test]
    fn test_terminal_appends_final_verdict_entry() {
        let mut answers = past_stage_a();
        answers.ai_techniques.logic_knowledge_based = true;
        let eval = ClassificationEngine::default().evaluate(&answers);
        assert_eq!(eval.verdict(), Some(Verdict::AISystem));
        let last = eval.log_entries.last().unwrap();
        assert_eq!(last.step, FINAL_VERDICT_STEP);
        assert_eq!(last.outcome, "AI system");
        assert_eq!(last.notes, eval.rationale);
    }

    #[test]
    fn test_stage_a_final_notes() {
        let answers = AnswerSet {
            non_ai_categories: NonAiCategories {
                basic_data_processing: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let eval = ClassificationEngine::default().evaluate(&answers);
        let last = eval.log_entries.last().unwrap();
        assert_eq!(last.notes, vec!["Classification completed at Step 1.".to_string()]);
    }

    #[test]
    fn test_conflict_has_no_verdict() {
        let mut answers = past_stage_a();
        answers.ai_techniques.none_selected = true;
        answers.ai_techniques.ml_selected = true;
        let eval = ClassificationEngine::default().evaluate(&answers);
        assert!(eval.is_conflicting());
        assert_eq!(eval.verdict(), None);
        assert_eq!(eval.state(), SessionState::AwaitingStageB);
        assert!(eval.assessment(&answers).is_none());
    }
}
