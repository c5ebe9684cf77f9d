//! Stage C: optimization-only carve-out and final verdict synthesis.

use super::gate::{Gate, GateContext, GateResult, Termination};
use super::types::Stage;
use crate::answers::AnswerSet;
use crate::verdict::Verdict;

pub const RATIONALE_CARVE_OUT_MET: &str = "Optimization-only usage and all optimization carve-out conditions satisfied. \
     Borderline case: it likely falls outside the AI system definition; seek legal advice.";
pub const RATIONALE_CARVE_OUT_UNMET: &str =
    "Optimization-only usage claimed but not all carve-out conditions met.";
pub const RATIONALE_NOT_CLAIMED: &str =
    "Uses AI techniques, not limited to optimization-only carve-out.";
pub const RATIONALE_INFERS: &str = "Confirms inference from inputs to outputs.";
pub const RATIONALE_AUTONOMY: &str =
    "Operates with varying levels of autonomy (may still be human-in-the-loop).";

pub struct OptimizationGate;

impl Gate for OptimizationGate {
    fn stage(&self) -> Stage {
        Stage::OptimizationCarveOut
    }

    fn evaluate(&self, answers: &AnswerSet, ctx: &mut GateContext<'_>) -> GateResult {
        let opt = &answers.optimization;
        let conditions = opt.effective_conditions();
        let all_conditions_true = opt.all_conditions_true();

        let (outcome, notes) = if opt.claimed {
            let mut notes =
                vec!["User indicated AI models are used for optimization-only purposes.".to_string()];
            let satisfied = conditions.satisfied_labels();
            if !satisfied.is_empty() {
                notes.push(format!("Conditions satisfied: {}", satisfied.join(", ")));
            }
            let missing = conditions.missing_labels();
            if !all_conditions_true && !missing.is_empty() {
                notes.push(format!("Conditions not selected: {}", missing.join(", ")));
            }
            ("Optimization carve-out evaluated", notes)
        } else {
            (
                "Optimization carve-out not claimed",
                vec!["User selected 'No' for optimization-only usage.".to_string()],
            )
        };
        ctx.log.record(self.stage().step_name(), outcome, notes);

        let (verdict, first) = match (opt.claimed, all_conditions_true) {
            (true, true) => (Verdict::BorderlineLikelyNotAISystem, RATIONALE_CARVE_OUT_MET),
            (true, false) => (Verdict::AISystem, RATIONALE_CARVE_OUT_UNMET),
            (false, _) => (Verdict::AISystem, RATIONALE_NOT_CLAIMED),
        };

        let mut rationale = vec![first.to_string()];
        // Informational only; the verdict above is already fixed.
        if let Some(extra) = &answers.inference_autonomy {
            if extra.infers_outputs {
                rationale.push(RATIONALE_INFERS.to_string());
            }
            if extra.varying_autonomy {
                rationale.push(RATIONALE_AUTONOMY.to_string());
            }
        }

        GateResult::Terminate(Termination::new(verdict, rationale))
    }
}
