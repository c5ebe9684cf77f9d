//! Stage A: negative-scope gate.

use super::gate::{Gate, GateContext, GateResult, SELECT_TO_CONTINUE, Termination, owned};
use super::types::Stage;
use crate::answers::AnswerSet;
use crate::verdict::Verdict;

pub struct NegativeScopeGate;

impl Gate for NegativeScopeGate {
    fn stage(&self) -> Stage {
        Stage::NegativeScope
    }

    fn evaluate(&self, answers: &AnswerSet, ctx: &mut GateContext<'_>) -> GateResult {
        let step = self.stage().step_name();
        let cats = &answers.non_ai_categories;
        let selected = cats.selected_labels();

        // Unable-to-verify always proceeds; selections are kept for the record only.
        if cats.unable_to_verify {
            let mut notes =
                vec!["Unable to verify whether the solution fits a non-AI exclusion.".to_string()];
            if !selected.is_empty() {
                notes.push(format!(
                    "Selections captured for transparency: {}",
                    selected.join(", ")
                ));
            }
            ctx.log.record(step, "Unable to verify", notes);
            return GateResult::Proceed;
        }

        if cats.none_applies && cats.any_selected() {
            return GateResult::conflict(
                self.stage(),
                "'None applies' cannot be selected together with a non-AI category.",
            );
        }

        if cats.any_selected() {
            let listed = selected.join(", ");
            ctx.log.record(
                step,
                "Non-AI category selected",
                vec![format!("Selected NON-AI categories: {listed}")],
            );
            let rationale = vec![
                format!("Selected NON-AI category during Step 1: {listed}."),
                "These solutions follow predefined human rules and do not infer outputs using AI models."
                    .to_string(),
            ];
            return GateResult::Terminate(
                Termination::new(Verdict::LikelyNotAISystem, rationale)
                    .with_final_notes(owned(&["Classification completed at Step 1."])),
            );
        }

        if !cats.none_applies {
            return GateResult::awaiting(self.stage(), SELECT_TO_CONTINUE);
        }

        ctx.log.record(
            step,
            "No non-AI categories apply",
            owned(&["Confirmed none of the exclusion categories matched."]),
        );
        GateResult::Proceed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::NonAiCategories;
    use crate::decision_log::DecisionLog;
    use crate::engine::types::EngineOptions;

    fn run(cats: NonAiCategories) -> (GateResult, DecisionLog) {
        let answers = AnswerSet {
            non_ai_categories: cats,
            ..Default::default()
        };
        let options = EngineOptions::default();
        let mut log = DecisionLog::new();
        let result = NegativeScopeGate.evaluate(
            &answers,
            &mut GateContext {
                options: &options,
                log: &mut log,
            },
        );
        (result, log)
    }

    #[test]
    fn test_nothing_selected_awaits() {
        let (result, log) = run(NonAiCategories::default());
        assert_eq!(
            result,
            GateResult::awaiting(Stage::NegativeScope, SELECT_TO_CONTINUE)
        );
        assert!(log.is_empty());
    }

    #[test]
    fn test_none_applies_proceeds() {
        let (result, log) = run(NonAiCategories {
            none_applies: true,
            ..Default::default()
        });
        assert_eq!(result, GateResult::Proceed);
        assert_eq!(log.entries()[0].outcome, "No non-AI categories apply");
    }

    #[test]
    fn test_category_terminates() {
        let (result, _) = run(NonAiCategories {
            simple_prediction: true,
            ..Default::default()
        });
        match result {
            GateResult::Terminate(t) => {
                assert_eq!(t.verdict, Verdict::LikelyNotAISystem);
                assert!(t.rationale[0].contains("Simple prediction systems"));
                assert!(t.rationale[1].contains("predefined human rules"));
            }
            other => panic!("expected termination, got {other:?}"),
        }
    }

    #[test]
    fn test_unable_to_verify_overrides_selections() {
        let (result, log) = run(NonAiCategories {
            heuristic_based: true,
            none_applies: true,
            unable_to_verify: true,
            ..Default::default()
        });
        assert_eq!(result, GateResult::Proceed);
        assert_eq!(log.entries()[0].outcome, "Unable to verify");
        assert!(log.entries()[0].notes[1].contains("Classical heuristic-based systems"));
    }

    #[test]
    fn test_none_applies_with_category_conflicts() {
        let (result, log) = run(NonAiCategories {
            none_applies: true,
            basic_data_processing: true,
            ..Default::default()
        });
        assert!(matches!(result, GateResult::Conflict { stage: Stage::NegativeScope, .. }));
        assert!(log.is_empty());
    }
}
