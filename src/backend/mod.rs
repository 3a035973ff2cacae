//! Generation backend: one round-trip to a hosted text-generation service.
//!
//! The [`GenerationBackend`] trait is the seam the orchestrator calls through
//! and tests substitute. The shipped implementation is [`HttpBackend`] for
//! OpenAI-style chat-completion endpoints. A backend performs exactly one
//! attempt — no retries; any retry or fallback policy lives above this layer.

pub mod http;

pub use http::{BackendSettings, HttpBackend};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Per-task generation parameters. Each task fixes its own values; they are
/// not caller-overridable at call time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    /// Sampling temperature, held to [0, 1]
    pub temperature: f32,
    /// Output token ceiling, at least 1
    pub max_output_tokens: u32,
}

impl GenerationConfig {
    /// Construct a config, clamping out-of-range values into the invariant
    /// rather than failing: temperature to [0, 1], token ceiling to >= 1.
    pub fn new(temperature: f32, max_output_tokens: u32) -> Self {
        Self {
            temperature: temperature.clamp(0.0, 1.0),
            max_output_tokens: max_output_tokens.max(1),
        }
    }
}

/// Why a backend attempt failed.
///
/// The orchestrator collapses every variant into the transport-failure
/// fallback path; the distinction exists for logs.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("backend response missing generated content: {0}")]
    MalformedResponse(String),

    #[error("generation attempt timed out")]
    Timeout,
}

/// A single "generate structured output" operation against a hosted model.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Perform one generation round-trip and return the raw generated text.
    ///
    /// `output_schema` is passed along as a shape hint for backends that
    /// support one; the returned text is not validated here.
    async fn generate(
        &self,
        prompt: &str,
        output_schema: &Value,
        config: &GenerationConfig,
    ) -> Result<String, BackendError>;
}
