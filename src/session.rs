//! Caller-owned questionnaire session.
//!
//! Holds the latest answers and evaluation for one user. The engine keeps no
//! state between calls; everything session-scoped lives here and is discarded
//! by `reset`.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::answers::AnswerSet;
use crate::engine::{Assessment, ClassificationEngine, Evaluation, SessionState, Stage};

pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    engine: ClassificationEngine,
    answers: AnswerSet,
    last: Option<Evaluation>,
    /// Furthest stage completed; its answers are frozen
    passed: Option<Stage>,
}

impl Session {
    pub fn new(engine: ClassificationEngine) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(session_id = %id, "session started");
        Self {
            id,
            started_at: Utc::now(),
            engine,
            answers: AnswerSet::default(),
            last: None,
            passed: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn last_evaluation(&self) -> Option<&Evaluation> {
        self.last.as_ref()
    }

    pub fn state(&self) -> SessionState {
        self.last
            .as_ref()
            .map_or(SessionState::AwaitingStageA, Evaluation::state)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state(), SessionState::Terminal { .. })
    }

    /// Evaluate the submitted answers through every stage.
    pub fn submit(&mut self, answers: AnswerSet) -> &Evaluation {
        self.submit_until(answers, Stage::OptimizationCarveOut)
    }

    /// Evaluate the submitted answers up to and including `last`.
    ///
    /// Answers for stages already completed are kept as first submitted and
    /// the session never moves back to an earlier state. A terminal session
    /// ignores further submissions and returns its verdict unchanged; call
    /// [`Session::reset`] to start over.
    pub fn submit_until(&mut self, answers: AnswerSet, last: Stage) -> &Evaluation {
        if self.is_terminal() {
            tracing::debug!(session_id = %self.id, "submission ignored: session is terminal");
        } else {
            let answers = self.freeze_completed(answers);
            let last = self.passed.map_or(last, |passed| last.max(passed));
            let evaluation = self.engine.evaluate_until(&answers, last);
            self.passed = self.passed.max(evaluation.state().passed_stage());
            self.answers = answers;
            self.last = Some(evaluation);
        }
        // terminal sessions always hold their evaluation
        self.last
            .get_or_insert_with(|| self.engine.evaluate(&self.answers))
    }

    fn freeze_completed(&self, mut answers: AnswerSet) -> AnswerSet {
        let Some(passed) = self.passed else {
            return answers;
        };
        if answers.non_ai_categories != self.answers.non_ai_categories {
            tracing::warn!(session_id = %self.id, "ignoring changes to completed step 1");
            answers.non_ai_categories = self.answers.non_ai_categories.clone();
        }
        if passed >= Stage::AiTechniques && answers.ai_techniques != self.answers.ai_techniques {
            tracing::warn!(session_id = %self.id, "ignoring changes to completed step 2");
            answers.ai_techniques = self.answers.ai_techniques.clone();
        }
        answers
    }

    /// Exportable record, available once the session is terminal
    pub fn assessment(&self) -> Option<Assessment> {
        self.last.as_ref()?.assessment(&self.answers)
    }

    /// Clear answers and the decision log and start a new session id
    pub fn reset(&mut self) {
        tracing::debug!(session_id = %self.id, "session reset");
        self.id = Uuid::new_v4();
        self.started_at = Utc::now();
        self.answers = AnswerSet::default();
        self.last = None;
        self.passed = None;
    }
}
