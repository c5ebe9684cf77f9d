//! Interactive questionnaire over line-based input.
//!
//! Walks the user through Step 1 → Step 2 → Step 3, submitting the growing
//! answer set to a [`Session`] after each step and re-asking a step whenever
//! the engine reports missing or conflicting answers.

use std::io::{BufRead, Write};

use crate::answers::{AiModelKnowledge, AnswerSet, InferenceAutonomy, MlTechnique};
use crate::engine::{Assessment, ClassificationEngine, Evaluation, SessionState, Stage};
use crate::error::{ClassifierError, Result};
use crate::render;
use crate::session::Session;

pub struct Wizard<R, W> {
    input: R,
    output: W,
    session: Session,
    answers: AnswerSet,
}

impl<R: BufRead, W: Write> Wizard<R, W> {
    pub fn new(engine: ClassificationEngine, input: R, output: W) -> Self {
        Self {
            input,
            output,
            session: Session::new(engine),
            answers: AnswerSet::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run until a verdict is reached. Fails if input ends first.
    pub fn run(&mut self) -> Result<Assessment> {
        writeln!(self.output, "Is your solution an AI system?")?;
        writeln!(self.output, "Answer y/n unless told otherwise.\n")?;

        loop {
            let state = self.step()?;
            if let SessionState::Terminal { .. } = state {
                break;
            }
        }

        let evaluation = self.current()?.clone();
        write!(self.output, "\n{}", render::summary(&evaluation))?;
        self.output.flush()?;
        self.session.assessment().ok_or_else(|| ClassifierError::Session {
            message: "session ended without a verdict".into(),
        })
    }

    /// Ask the questions for the stage the session is waiting on, then resubmit.
    fn step(&mut self) -> Result<SessionState> {
        let (stage, submit_through) = match self.session.state() {
            SessionState::AwaitingStageA => (Stage::NegativeScope, Stage::NegativeScope),
            SessionState::AwaitingStageB => (Stage::AiTechniques, Stage::AiTechniques),
            SessionState::AwaitingStageBUnableSub => (Stage::UnableToVerify, Stage::AiTechniques),
            SessionState::AwaitingStageC => {
                (Stage::OptimizationCarveOut, Stage::OptimizationCarveOut)
            }
            terminal @ SessionState::Terminal { .. } => return Ok(terminal),
        };

        match stage {
            Stage::NegativeScope => self.ask_negative_scope()?,
            Stage::AiTechniques => self.ask_techniques()?,
            Stage::UnableToVerify => self.ask_unable_to_verify()?,
            Stage::OptimizationCarveOut => self.ask_optimization()?,
        }

        let evaluation = self
            .session
            .submit_until(self.answers.clone(), submit_through)
            .clone();
        if let Some(advisory) = evaluation.advisory()
            && evaluation.state() == stage.awaiting_state()
        {
            writeln!(self.output, "! {advisory}")?;
        }
        Ok(evaluation.state())
    }

    fn current(&self) -> Result<&Evaluation> {
        self.session
            .last_evaluation()
            .ok_or_else(|| ClassifierError::Session {
                message: "no evaluation recorded".into(),
            })
    }

    fn ask_negative_scope(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "\n{}: does your solution fall into any of these categories?",
            Stage::NegativeScope.step_name()
        )?;
        let c = &mut self.answers.non_ai_categories;
        c.none_applies = ask_bool(&mut self.input, &mut self.output, "None applies")?;
        c.basic_data_processing =
            ask_bool(&mut self.input, &mut self.output, "Basic data processing tools")?;
        c.heuristic_based = ask_bool(
            &mut self.input,
            &mut self.output,
            "Classical heuristic-based systems",
        )?;
        c.simple_prediction =
            ask_bool(&mut self.input, &mut self.output, "Simple prediction systems")?;
        c.unable_to_verify =
            ask_bool(&mut self.input, &mut self.output, "I am not able to verify this")?;
        Ok(())
    }

    fn ask_techniques(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "\n{}: was any component developed using AI techniques?",
            Stage::AiTechniques.step_name()
        )?;
        let t = &mut self.answers.ai_techniques;
        t.ml_selected = ask_bool(
            &mut self.input,
            &mut self.output,
            "Yes, using Machine Learning techniques",
        )?;
        t.ml_technique_list = if t.ml_selected {
            ask_techniques_list(&mut self.input, &mut self.output)?
        } else {
            Vec::new()
        };
        t.logic_knowledge_based = ask_bool(
            &mut self.input,
            &mut self.output,
            "Yes, using Logic- and Knowledge-Based Techniques",
        )?;
        t.none_selected = ask_bool(
            &mut self.input,
            &mut self.output,
            "No, none of these techniques was used",
        )?;
        t.unable_to_verify =
            ask_bool(&mut self.input, &mut self.output, "I am not able to verify this")?;
        Ok(())
    }

    fn ask_unable_to_verify(&mut self) -> Result<()> {
        let t = &mut self.answers.ai_techniques;
        if t.ai_model_knowledge == AiModelKnowledge::Unset {
            t.ai_model_knowledge = ask_knowledge(&mut self.input, &mut self.output)?;
        }
        if t.ai_model_knowledge != AiModelKnowledge::Unsure {
            return Ok(());
        }

        writeln!(self.output, "Is the solution generating any of the following?")?;
        let g = &mut t.generation_indicators;
        g.complex_predictions = ask_bool(&mut self.input, &mut self.output, "Complex predictions")?;
        g.recommendations = ask_bool(&mut self.input, &mut self.output, "Recommendations")?;
        g.content = ask_bool(&mut self.input, &mut self.output, "Content")?;
        g.decisions = ask_bool(&mut self.input, &mut self.output, "Decisions")?;
        g.none_applies = ask_bool(&mut self.input, &mut self.output, "None applies")?;
        Ok(())
    }

    fn ask_optimization(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "\n{}: are AI models used only for mathematical optimization / speed-up?",
            Stage::OptimizationCarveOut.step_name()
        )?;
        let o = &mut self.answers.optimization;
        o.claimed = ask_bool(&mut self.input, &mut self.output, "Optimization-only usage")?;
        if o.claimed {
            writeln!(self.output, "Select all that apply:")?;
            let c = &mut o.conditions;
            c.supporting_role_only = ask_bool(
                &mut self.input,
                &mut self.output,
                "The model plays a supporting role only",
            )?;
            c.fixed_after_deployment = ask_bool(
                &mut self.input,
                &mut self.output,
                "The model is fixed after deployment",
            )?;
            c.no_influence_objectives = ask_bool(
                &mut self.input,
                &mut self.output,
                "The model does not influence or redefine the system's objectives",
            )?;
            c.outputs_narrowly_scoped =
                ask_bool(&mut self.input, &mut self.output, "The outputs are narrowly scoped")?;
            c.performance_is_efficiency = ask_bool(
                &mut self.input,
                &mut self.output,
                "Performance metric is computational efficiency",
            )?;
        }

        let infers_outputs = ask_bool(
            &mut self.input,
            &mut self.output,
            "Does the system infer outputs from the inputs it receives",
        )?;
        let varying_autonomy = ask_bool(
            &mut self.input,
            &mut self.output,
            "Does it operate with varying levels of autonomy",
        )?;
        self.answers.inference_autonomy = (infers_outputs || varying_autonomy).then_some(
            InferenceAutonomy {
                infers_outputs,
                varying_autonomy,
            },
        );
        Ok(())
    }
}

fn read_answer<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    write!(output, "{prompt}: ")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(ClassifierError::Session {
            message: "input ended before the assessment was complete".into(),
        });
    }
    Ok(line.trim().to_string())
}

fn ask_bool<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<bool> {
    loop {
        let answer = read_answer(input, output, &format!("{prompt} [y/N]"))?;
        match answer.to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "" | "n" | "no" => return Ok(false),
            _ => writeln!(output, "Please answer y or n.")?,
        }
    }
}

fn ask_techniques_list<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Vec<MlTechnique>> {
    let options: Vec<&str> = MlTechnique::ALL.iter().map(|m| m.label()).collect();
    loop {
        let answer = read_answer(
            input,
            output,
            &format!(
                "Machine learning techniques used, comma-separated (optional) [{}]",
                options.join(", ")
            ),
        )?;
        let mut picked = Vec::new();
        let mut unknown = Vec::new();
        for part in answer.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match MlTechnique::parse(part) {
                Some(t) if !picked.contains(&t) => picked.push(t),
                Some(_) => {}
                None => unknown.push(part.to_string()),
            }
        }
        if unknown.is_empty() {
            return Ok(picked);
        }
        writeln!(output, "Unknown technique(s): {}", unknown.join(", "))?;
    }
}

fn ask_knowledge<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<AiModelKnowledge> {
    writeln!(output, "Do you know if the solution uses AI Models?")?;
    writeln!(output, "  1) Yes it use an AI Model")?;
    writeln!(output, "  2) No it does not")?;
    writeln!(output, "  3) I am not sure")?;
    loop {
        let answer = read_answer(input, output, "Choice")?;
        let choice = match answer.as_str() {
            "1" => Some(AiModelKnowledge::Yes),
            "2" => Some(AiModelKnowledge::No),
            "3" => Some(AiModelKnowledge::Unsure),
            other => AiModelKnowledge::parse(other).filter(|k| *k != AiModelKnowledge::Unset),
        };
        if let Some(choice) = choice {
            return Ok(choice);
        }
        writeln!(output, "Please pick 1, 2 or 3.")?;
    }
}
