//! Stage B: AI-technique gate and the "unable to verify" sub-flow.

use super::gate::{
    Gate, GateContext, GateResult, SEEK_LEGAL_CONSULTATION, SELECT_TO_CONTINUE, Termination,
    owned,
};
use super::types::{Stage, TechniqueListPolicy};
use crate::answers::{AiModelKnowledge, AiTechniques, AnswerSet};
use crate::verdict::Verdict;

pub struct AiTechniqueGate;

impl Gate for AiTechniqueGate {
    fn stage(&self) -> Stage {
        Stage::AiTechniques
    }

    fn evaluate(&self, answers: &AnswerSet, ctx: &mut GateContext<'_>) -> GateResult {
        let step = self.stage().step_name();
        let t = &answers.ai_techniques;

        if t.none_selected && t.any_technique_claimed() {
            return GateResult::conflict(
                self.stage(),
                "Remove other selections if you choose 'None of these techniques is used'.",
            );
        }

        if t.unable_to_verify {
            if t.none_selected || t.any_technique_claimed() {
                return GateResult::conflict(
                    self.stage(),
                    "Remove other selections to continue with the 'I am not able to verify this' option.",
                );
            }
            return unable_to_verify(t, ctx);
        }

        if t.none_selected {
            ctx.log.record(
                step,
                "No AI techniques declared",
                owned(&["User confirmed that none of the listed AI techniques are used."]),
            );
            return GateResult::Terminate(Termination::new(
                Verdict::LikelyNotAISystem,
                owned(&[
                    "User explicitly selected no AI techniques ('None of these techniques is used').",
                    "Without AI techniques, the solution is generally not considered an AI system.",
                ]),
            ));
        }

        // With "none" handled above, no positive technique means the step is unanswered.
        let uses_ai_techniques = t.ml_selected || t.logic_knowledge_based;
        if !uses_ai_techniques {
            return GateResult::awaiting(self.stage(), SELECT_TO_CONTINUE);
        }

        if t.ml_selected
            && t.ml_technique_list.is_empty()
            && ctx.options.technique_list_policy == TechniqueListPolicy::Strict
        {
            return GateResult::awaiting(
                self.stage(),
                "Select at least one machine learning technique to continue.",
            );
        }

        let mut notes = Vec::new();
        if t.ml_selected {
            if t.ml_technique_list.is_empty() {
                notes.push(
                    "Machine learning techniques identified (details not specified).".to_string(),
                );
            } else {
                let listed: Vec<&str> = t.ml_technique_list.iter().map(|m| m.label()).collect();
                notes.push(format!(
                    "Machine learning techniques identified: {}",
                    listed.join(", ")
                ));
            }
        }
        if t.logic_knowledge_based {
            notes.push("Logic- and knowledge-based techniques identified.".to_string());
        }
        ctx.log.record(step, "AI techniques identified", notes);
        GateResult::Proceed
    }
}

fn unable_to_verify(t: &AiTechniques, ctx: &mut GateContext<'_>) -> GateResult {
    let step = Stage::UnableToVerify.step_name();
    match t.ai_model_knowledge {
        AiModelKnowledge::Unset => {
            GateResult::awaiting(Stage::UnableToVerify, SELECT_TO_CONTINUE)
        }
        AiModelKnowledge::Yes => {
            ctx.log.record(
                step,
                "Confirmed AI Model usage",
                owned(&[
                    "Unable to verify specific AI techniques.",
                    "User stated explicitly that an AI Model is used.",
                ]),
            );
            GateResult::Terminate(Termination::new(
                Verdict::AISystem,
                owned(&[
                    "User confirmed the solution uses an AI Model despite being unable to verify the supporting AI techniques.",
                    "Seek legal consultation to validate the declaration.",
                ]),
            ))
        }
        AiModelKnowledge::No => {
            ctx.log.record(
                step,
                "User denied AI Model usage",
                owned(&[
                    "Unable to verify specific AI techniques.",
                    "User stated the solution does not use an AI Model.",
                ]),
            );
            GateResult::Terminate(Termination::new(
                Verdict::LikelyNotAISystem,
                owned(&[
                    "User denied AI Model usage while unable to verify AI techniques.",
                    SEEK_LEGAL_CONSULTATION,
                ]),
            ))
        }
        AiModelKnowledge::Unsure => generation_indicators(t, ctx),
    }
}

fn generation_indicators(t: &AiTechniques, ctx: &mut GateContext<'_>) -> GateResult {
    let step = Stage::UnableToVerify.step_name();
    let g = &t.generation_indicators;

    if g.none_applies && g.any_selected() {
        return GateResult::conflict(
            Stage::UnableToVerify,
            "'None applies' cannot be selected together with other options.",
        );
    }
    if !g.none_applies && !g.any_selected() {
        return GateResult::awaiting(
            Stage::UnableToVerify,
            "Select at least one option to continue the assessment.",
        );
    }

    if g.any_selected() {
        let fired = g.selected_labels().join(", ");
        ctx.log.record(
            step,
            "Generation behaviours observed",
            vec![
                "Unable to verify specific AI techniques or confirm AI Model usage.".to_string(),
                format!("Indicators selected: {fired}"),
            ],
        );
        return GateResult::Terminate(Termination::new(
            Verdict::LikelyAISystem,
            vec![
                "Unable to verify AI techniques and unsure about AI Model usage.".to_string(),
                format!("Generation indicators selected: {fired}"),
                SEEK_LEGAL_CONSULTATION.to_string(),
            ],
        ));
    }

    ctx.log.record(
        step,
        "No generation indicators",
        owned(&[
            "Unable to verify specific AI techniques or confirm AI Model usage.",
            "User indicated none of the generation behaviours apply.",
        ]),
    );
    GateResult::Terminate(Termination::new(
        Verdict::LikelyNotAISystem,
        owned(&[
            "Unable to verify AI techniques and unsure about AI Model usage.",
            "No generation indicators were selected.",
            SEEK_LEGAL_CONSULTATION,
        ]),
    ))
}
