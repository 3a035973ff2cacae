//! Structured call orchestrator.
//!
//! [`Gateway::run`] is the single entry point all tasks share: validate
//! input, build the prompt, make one backend attempt under a timeout,
//! validate the output, and substitute the task's static fallback on any
//! failure along the way. For a registered task the call always returns a
//! [`GenerationOutcome`] — the caller contract has no error arm for runtime
//! trouble.

pub mod outcome;

pub use outcome::{FallbackReason, GenerationOutcome};

use crate::backend::{BackendError, GenerationBackend};
use crate::task::{TaskDefinition, TaskRegistry};
use crate::{Error, Result};
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_ATTEMPT_TIMEOUT_SECS: u64 = 30;

/// The orchestrator: a task registry bound to one generation backend.
///
/// Stateless per call; concurrent `run` invocations are independent and
/// unordered.
pub struct Gateway {
    registry: Arc<TaskRegistry>,
    backend: Arc<dyn GenerationBackend>,
    attempt_timeout: Duration,
}

impl Gateway {
    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::new()
    }

    /// Run one structured call.
    ///
    /// The only error path is an unregistered `task_name` — a programmer
    /// error, since registration happens once at process start. Every runtime
    /// failure (bad input, transport trouble, malformed output) resolves to
    /// `Ok(GenerationOutcome::Fallback { .. })` carrying the task's static
    /// fallback value.
    pub async fn run(&self, task_name: &str, input: Value) -> Result<GenerationOutcome> {
        let task = self
            .registry
            .get(task_name)
            .ok_or_else(|| Error::unknown_task(task_name))?;

        debug!(task = task_name, "structured call started");

        let input_check = task.input_validator().validate(&input);
        if !input_check.is_valid() {
            return Ok(self.fall_back(
                task,
                FallbackReason::ValidationFailure,
                &input_check.error_messages().join("; "),
            ));
        }
        // Input schemas declare object types, so a validated input is an
        // object.
        let Some(fields) = input.as_object() else {
            return Ok(self.fall_back(
                task,
                FallbackReason::ValidationFailure,
                "input is not an object",
            ));
        };

        let prompt = task.build_prompt(fields);

        let attempt = tokio::time::timeout(
            self.attempt_timeout,
            self.backend
                .generate(&prompt, task.output_schema(), task.config()),
        )
        .await;
        let raw = match attempt {
            Err(_elapsed) => {
                return Ok(self.fall_back(
                    task,
                    FallbackReason::TransportFailure,
                    &BackendError::Timeout.to_string(),
                ));
            }
            Ok(Err(backend_error)) => {
                return Ok(self.fall_back(
                    task,
                    FallbackReason::TransportFailure,
                    &backend_error.to_string(),
                ));
            }
            Ok(Ok(raw)) => raw,
        };

        let Some(parsed) = extract_json(&raw) else {
            return Ok(self.fall_back(
                task,
                FallbackReason::SchemaMismatch,
                "output is not parseable JSON",
            ));
        };
        let output_check = task.output_validator().validate(&parsed);
        if !output_check.is_valid() {
            return Ok(self.fall_back(
                task,
                FallbackReason::SchemaMismatch,
                &output_check.error_messages().join("; "),
            ));
        }

        debug!(task = task_name, "structured call succeeded");
        Ok(GenerationOutcome::Success { fields: parsed })
    }

    fn fall_back(
        &self,
        task: &TaskDefinition,
        reason: FallbackReason,
        detail: &str,
    ) -> GenerationOutcome {
        warn!(
            task = task.name(),
            reason = %reason,
            detail,
            "structured call fell back to the static default"
        );
        GenerationOutcome::Fallback {
            value: task.fallback_value().clone(),
            reason,
        }
    }
}

/// Pull a JSON value out of raw model text.
///
/// Tries a direct parse first, then the usual wrappings models produce:
/// fenced ```json blocks, plain fenced blocks, and a bare object or array
/// embedded in prose.
pub(crate) fn extract_json(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if let Ok(parsed) = serde_json::from_str::<Value>(trimmed) {
        return Some(parsed);
    }

    let patterns = [
        r"```json\s*([\s\S]*?)\s*```",
        r"```\s*([\s\S]*?)\s*```",
        r"\{[\s\S]*\}",
        r"\[[\s\S]*\]",
    ];
    for pattern in patterns {
        let Ok(re) = Regex::new(pattern) else {
            continue;
        };
        if let Some(captures) = re.captures(trimmed) {
            let candidate = captures
                .get(1)
                .or_else(|| captures.get(0))
                .map(|m| m.as_str())
                .unwrap_or(trimmed);
            if let Ok(parsed) = serde_json::from_str::<Value>(candidate.trim()) {
                return Some(parsed);
            }
        }
    }

    None
}

/// Builder for [`Gateway`].
pub struct GatewayBuilder {
    registry: Option<Arc<TaskRegistry>>,
    backend: Option<Arc<dyn GenerationBackend>>,
    attempt_timeout: Duration,
}

impl GatewayBuilder {
    pub fn new() -> Self {
        Self {
            registry: None,
            backend: None,
            attempt_timeout: Duration::from_secs(DEFAULT_ATTEMPT_TIMEOUT_SECS),
        }
    }

    /// Use a custom task registry. Defaults to the built-in logbook task set.
    pub fn registry(mut self, registry: Arc<TaskRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn backend(mut self, backend: Arc<dyn GenerationBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Upper bound on one generation attempt. Expiry takes the same fallback
    /// path as any other transport failure.
    pub fn attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    pub fn build(self) -> Result<Gateway> {
        let backend = self
            .backend
            .ok_or_else(|| Error::configuration("gateway requires a generation backend"))?;
        let registry = self
            .registry
            .unwrap_or_else(crate::tasks::default_registry);

        Ok(Gateway {
            registry,
            backend,
            attempt_timeout: self.attempt_timeout,
        })
    }
}

impl Default for GatewayBuilder {
    fn default() -> Self {
        Self::new()
    }
}
