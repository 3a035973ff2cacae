use thiserror::Error;

/// Unified error type for the gateway.
///
/// Runtime failures of a structured call (bad input, transport trouble,
/// malformed output) never surface here — they are absorbed into a
/// [`crate::gateway::GenerationOutcome::Fallback`]. This enum covers the
/// programmer-level faults that remain.
#[derive(Debug, Error)]
pub enum Error {
    /// A task name was used that was never registered. This is a programmer
    /// error, not a runtime condition: task registration happens once at
    /// process start.
    #[error("unknown task: {name}")]
    UnknownTask { name: String },

    #[error("configuration error: {message}")]
    Configuration { message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    pub fn unknown_task(name: impl Into<String>) -> Self {
        Error::UnknownTask { name: name.into() }
    }
}
