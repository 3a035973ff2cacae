//! # structcall
//!
//! A structured generation gateway: ask a hosted language model for
//! schema-shaped output from free-text input, and always get a usable value
//! back.
//!
//! ## Overview
//!
//! Every AI-assisted operation ("task") is a data registration, not a code
//! copy: a [`task::TaskDefinition`] bundles an input schema, an output schema,
//! a pure prompt template, a fixed generation config, and a static fallback
//! value. The [`gateway::Gateway`] runs the one contract all tasks share:
//!
//! 1. validate input — on failure, fall back without calling the backend
//! 2. build the prompt (pure, injection-safe)
//! 3. invoke the generation backend once, under a timeout
//! 4. parse and validate the output against the task's schema
//! 5. on any failure, return the task's static fallback with a reason
//!
//! For a registered task the gateway never errors and never panics: each call
//! yields a [`gateway::GenerationOutcome`], either `Success` or `Fallback`.
//! Callers can always render *something*.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use structcall::{BackendSettings, LogbookAssistant};
//!
//! #[tokio::main]
//! async fn main() -> structcall::Result<()> {
//!     let settings = BackendSettings::new("https://api.openai.com/v1", "gpt-4o-mini")
//!         .with_api_key("your-api-key");
//!     let assistant = LogbookAssistant::builder().http_backend(settings)?.build()?;
//!
//!     let reply = assistant
//!         .analyze_sentiment("Fixed three critical bugs today.")
//!         .await?;
//!     println!("sentiment: {:?} (fallback: {:?})", reply.output.sentiment, reply.fallback);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`schema`] | Structural JSON validation and schema builders |
//! | [`prompt`] | Pure, injection-safe prompt rendering helpers |
//! | [`backend`] | Generation backend trait and HTTP adapter |
//! | [`task`] | Task definitions and the immutable task registry |
//! | [`gateway`] | The orchestrator: validate, prompt, invoke, fall back |
//! | [`tasks`] | Built-in logbook task set (sentiment, skills, ...) |
//! | [`facade`] | Typed per-task operations over the built-in set |

pub mod backend;
pub mod facade;
pub mod gateway;
pub mod prompt;
pub mod schema;
pub mod task;
pub mod tasks;

// Re-export main types for convenience
pub use backend::{BackendError, BackendSettings, GenerationBackend, GenerationConfig, HttpBackend};
pub use facade::{Assisted, LogbookAssistant, LogbookAssistantBuilder};
pub use gateway::{FallbackReason, Gateway, GatewayBuilder, GenerationOutcome};
pub use schema::{SchemaValidator, ValidationError, ValidationResult};
pub use task::{TaskDefinition, TaskRegistry};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::Error;
