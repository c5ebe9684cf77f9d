//! Guided checklist that classifies a described solution as an "AI system" or
//! not, following the EU AI Act definition.
//!
//! The [`engine`] evaluates an [`answers::AnswerSet`] through three gated
//! stages and returns an [`engine::Evaluation`]; a [`session::Session`] keeps
//! one user's answers between submissions and [`export`] renders the final
//! [`engine::Assessment`] as JSON or Markdown.

pub mod answers;
pub mod config;
pub mod decision_log;
pub mod deserializers;
pub mod engine;
pub mod error;
pub mod export;
pub mod render;
pub mod session;
pub mod verdict;
pub mod wizard;

pub use answers::AnswerSet;
pub use engine::{Assessment, ClassificationEngine, Evaluation, Outcome, SessionState, Stage};
pub use error::{ClassifierError, Result};
pub use session::Session;
pub use verdict::Verdict;

/// Definition shown to users for reference
pub const AI_SYSTEM_DEFINITION: &str = "'AI system' means a machine-based system that is designed to operate with varying levels of autonomy \
     and that may exhibit adaptiveness after deployment, and that, for explicit or implicit objectives, \
     infers, from the input it receives, how to generate outputs such as predictions, content, recommendations, \
     or decisions that can influence physical or virtual environments.";

/// Build an engine from loaded configuration
pub fn engine_from_config(config: &config::Config) -> ClassificationEngine {
    ClassificationEngine::new(config.engine.clone())
}
