//! Contract tests for the structured call orchestrator: every call resolves
//! to a `GenerationOutcome`, fallbacks are deterministic, and the backend is
//! never touched when input validation fails.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use structcall::{
    tasks, BackendError, FallbackReason, Gateway, GenerationBackend, GenerationConfig,
    GenerationOutcome,
};

enum Behavior {
    Reply(String),
    NetworkError,
    Hang,
}

/// Backend double that counts invocations and follows a scripted behavior.
struct ScriptedBackend {
    behavior: Behavior,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    async fn generate(
        &self,
        _prompt: &str,
        _output_schema: &Value,
        _config: &GenerationConfig,
    ) -> Result<String, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Reply(text) => Ok(text.clone()),
            Behavior::NetworkError => Err(BackendError::Status {
                status: 503,
                message: "upstream unavailable".to_string(),
            }),
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(String::new())
            }
        }
    }
}

fn gateway_with(backend: Arc<ScriptedBackend>) -> Gateway {
    Gateway::builder()
        .backend(backend)
        .attempt_timeout(Duration::from_millis(200))
        .build()
        .unwrap()
}

#[tokio::test]
async fn sentiment_success_scenario() {
    let backend = ScriptedBackend::new(Behavior::Reply(
        r#"{"sentiment": "Positive"}"#.to_string(),
    ));
    let gateway = gateway_with(Arc::clone(&backend));

    let outcome = gateway
        .run(
            tasks::sentiment::NAME,
            json!({"log_content": "I fixed three critical bugs today and the team was thrilled."}),
        )
        .await
        .unwrap();

    assert_eq!(
        outcome,
        GenerationOutcome::Success {
            fields: json!({"sentiment": "Positive"})
        }
    );
    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn sentiment_network_error_falls_back_to_neutral() {
    let backend = ScriptedBackend::new(Behavior::NetworkError);
    let gateway = gateway_with(Arc::clone(&backend));

    let outcome = gateway
        .run(tasks::sentiment::NAME, json!({"log_content": "A fine day."}))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        GenerationOutcome::Fallback {
            value: json!({"sentiment": "Neutral"}),
            reason: FallbackReason::TransportFailure,
        }
    );
}

#[tokio::test]
async fn skills_empty_input_short_circuits_before_the_backend() {
    let backend = ScriptedBackend::new(Behavior::Reply(r#"{"skills": ["x"]}"#.to_string()));
    let gateway = gateway_with(Arc::clone(&backend));

    let outcome = gateway
        .run(tasks::skills::NAME, json!({"log_content": ""}))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        GenerationOutcome::Fallback {
            value: json!({"skills": []}),
            reason: FallbackReason::ValidationFailure,
        }
    );
    assert_eq!(backend.call_count(), 0, "adapter must not be invoked");
}

#[tokio::test]
async fn feedback_out_of_range_score_is_a_schema_mismatch() {
    let backend = ScriptedBackend::new(Behavior::Reply(
        json!({
            "supervisor_comment": "Solid work.",
            "technical_depth": {"score": 11, "feedback": "x"},
            "professional_tone": {"score": 7, "feedback": "y"},
            "problem_solving_clarity": {"score": 6, "feedback": "z"}
        })
        .to_string(),
    ));
    let gateway = gateway_with(Arc::clone(&backend));

    let outcome = gateway
        .run(
            tasks::feedback::NAME,
            json!({"log_content": "Debugged the payroll export."}),
        )
        .await
        .unwrap();

    assert_eq!(
        outcome.fallback_reason(),
        Some(FallbackReason::SchemaMismatch)
    );
}

#[tokio::test]
async fn partial_output_shape_is_rejected() {
    let backend = ScriptedBackend::new(Behavior::Reply("{}".to_string()));
    let gateway = gateway_with(Arc::clone(&backend));

    let outcome = gateway
        .run(tasks::sentiment::NAME, json!({"log_content": "A fine day."}))
        .await
        .unwrap();

    assert_eq!(
        outcome.fallback_reason(),
        Some(FallbackReason::SchemaMismatch)
    );
}

#[tokio::test]
async fn garbage_output_still_yields_an_outcome() {
    let backend = ScriptedBackend::new(Behavior::Reply(
        "I'm sorry, I cannot help with that.".to_string(),
    ));
    let gateway = gateway_with(Arc::clone(&backend));

    let outcome = gateway
        .run(tasks::polish::NAME, json!({"log_content": "today i fix printer"}))
        .await
        .unwrap();

    assert!(outcome.is_fallback());
    assert_eq!(
        outcome.fallback_reason(),
        Some(FallbackReason::SchemaMismatch)
    );
    // The fallback still renders: a non-empty polished_content.
    assert!(!outcome.fields()["polished_content"]
        .as_str()
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn hung_backend_times_out_as_transport_failure() {
    let backend = ScriptedBackend::new(Behavior::Hang);
    let gateway = gateway_with(Arc::clone(&backend));

    let outcome = gateway
        .run(
            tasks::suggestion::NAME,
            json!({"previous_log_content": "Configured the switch."}),
        )
        .await
        .unwrap();

    assert_eq!(
        outcome.fallback_reason(),
        Some(FallbackReason::TransportFailure)
    );
    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn fallback_value_is_identical_across_reasons() {
    // Validation failure...
    let backend = ScriptedBackend::new(Behavior::NetworkError);
    let gateway = gateway_with(Arc::clone(&backend));
    let from_validation = gateway
        .run(tasks::skills::NAME, json!({"log_content": ""}))
        .await
        .unwrap();

    // ...transport failure...
    let from_transport = gateway
        .run(tasks::skills::NAME, json!({"log_content": "A fine day."}))
        .await
        .unwrap();

    // ...and schema mismatch all carry the exact same value.
    let backend = ScriptedBackend::new(Behavior::Reply("{}".to_string()));
    let gateway = gateway_with(backend);
    let from_mismatch = gateway
        .run(tasks::skills::NAME, json!({"log_content": "A fine day."}))
        .await
        .unwrap();

    assert_eq!(from_validation.fields(), from_transport.fields());
    assert_eq!(from_transport.fields(), from_mismatch.fields());
    assert_eq!(*from_mismatch.fields(), json!({"skills": []}));
}

#[tokio::test]
async fn unknown_task_is_a_hard_error() {
    let backend = ScriptedBackend::new(Behavior::Reply("{}".to_string()));
    let gateway = gateway_with(backend);

    let err = gateway.run("no_such_task", json!({})).await;
    assert!(matches!(err, Err(structcall::Error::UnknownTask { .. })));
}

#[tokio::test]
async fn fenced_output_is_accepted() {
    let backend = ScriptedBackend::new(Behavior::Reply(
        "```json\n{\"sentiment\": \"Negative\"}\n```".to_string(),
    ));
    let gateway = gateway_with(backend);

    let outcome = gateway
        .run(tasks::sentiment::NAME, json!({"log_content": "Rough day."}))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        GenerationOutcome::Success {
            fields: json!({"sentiment": "Negative"})
        }
    );
}
