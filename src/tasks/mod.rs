//! Built-in logbook task set.
//!
//! Six structured-generation tasks for daily attachment-log entries. Each
//! submodule declares its input/output schemas, prompt template, fixed
//! generation config, static fallback, and a typed output struct. The
//! orchestration is shared; a task is data, not code.

pub mod feedback;
pub mod polish;
pub mod sentiment;
pub mod skills;
pub mod suggestion;
pub mod summary;

pub use feedback::{FeedbackOutput, ScoredFeedback};
pub use polish::PolishOutput;
pub use sentiment::{Sentiment, SentimentOutput};
pub use skills::SkillsOutput;
pub use suggestion::SuggestionOutput;
pub use summary::MonthlySummaryOutput;

use crate::task::TaskRegistry;
use crate::Result;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Longest accepted log entry, in characters.
pub(crate) const MAX_LOG_CHARS: u64 = 5000;

/// Build a fresh registry holding the six built-in tasks.
pub fn registry() -> Result<TaskRegistry> {
    let mut registry = TaskRegistry::new();
    registry.register(sentiment::definition()?)?;
    registry.register(skills::definition()?)?;
    registry.register(feedback::definition()?)?;
    registry.register(polish::definition()?)?;
    registry.register(suggestion::definition()?)?;
    registry.register(summary::definition()?)?;
    Ok(registry)
}

/// The shared built-in registry, built once at first use.
pub fn default_registry() -> Arc<TaskRegistry> {
    static REGISTRY: Lazy<Arc<TaskRegistry>> = Lazy::new(|| {
        Arc::new(registry().expect("built-in task definitions are well-formed"))
    });
    Arc::clone(&REGISTRY)
}
