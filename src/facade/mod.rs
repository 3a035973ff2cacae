//! Typed facade over the built-in logbook task set.
//!
//! [`LogbookAssistant`] exposes one async method per task with plain Rust
//! types in and out, wrapping the gateway's JSON contract. The methods keep
//! the never-throws stance: every runtime failure arrives as a fallback
//! value, with the reason carried in [`Assisted::fallback`].

use crate::backend::{BackendSettings, GenerationBackend, HttpBackend};
use crate::gateway::{FallbackReason, Gateway, GatewayBuilder};
use crate::tasks::{
    self, FeedbackOutput, MonthlySummaryOutput, PolishOutput, SentimentOutput, SkillsOutput,
    SuggestionOutput,
};
use crate::Result;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// A typed task reply: the output plus, when generation failed, why the
/// static default was substituted.
#[derive(Debug, Clone, PartialEq)]
pub struct Assisted<T> {
    pub output: T,
    /// `None` for genuine model output; `Some(reason)` when the value is the
    /// task's static fallback.
    pub fallback: Option<FallbackReason>,
}

/// One typed method per built-in task.
pub struct LogbookAssistant {
    gateway: Gateway,
}

impl LogbookAssistant {
    pub fn builder() -> LogbookAssistantBuilder {
        LogbookAssistantBuilder::new()
    }

    /// Wrap an already-built gateway. The gateway must use a registry that
    /// contains the built-in task set (the default registry does).
    pub fn from_gateway(gateway: Gateway) -> Self {
        Self { gateway }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        task: &str,
        input: serde_json::Value,
    ) -> Result<Assisted<T>> {
        let outcome = self.gateway.run(task, input).await?;
        let fallback = outcome.fallback_reason();
        let output = serde_json::from_value(outcome.into_fields())?;
        Ok(Assisted { output, fallback })
    }

    /// Classify the overall tone of a log entry.
    pub async fn analyze_sentiment(&self, log_content: &str) -> Result<Assisted<SentimentOutput>> {
        self.call(tasks::sentiment::NAME, json!({"log_content": log_content}))
            .await
    }

    /// Extract demonstrated skills from a log entry.
    pub async fn extract_skills(&self, log_content: &str) -> Result<Assisted<SkillsOutput>> {
        self.call(tasks::skills::NAME, json!({"log_content": log_content}))
            .await
    }

    /// Generate supervisor-style feedback, optionally steered by the
    /// student's stated attachment goals.
    pub async fn generate_feedback(
        &self,
        log_content: &str,
        goals: Option<&str>,
    ) -> Result<Assisted<FeedbackOutput>> {
        let mut input = json!({"log_content": log_content});
        if let Some(goals) = goals {
            input["goals"] = json!(goals);
        }
        self.call(tasks::feedback::NAME, input).await
    }

    /// Rewrite a log entry in clearer professional language.
    pub async fn polish_entry(&self, log_content: &str) -> Result<Assisted<PolishOutput>> {
        self.call(tasks::polish::NAME, json!({"log_content": log_content}))
            .await
    }

    /// Suggest what the next day's entry could cover.
    pub async fn suggest_next_entry(
        &self,
        previous_log_content: &str,
    ) -> Result<Assisted<SuggestionOutput>> {
        self.call(
            tasks::suggestion::NAME,
            json!({"previous_log_content": previous_log_content}),
        )
        .await
    }

    /// Summarize a month of log entries into five report sections.
    pub async fn generate_monthly_summary(
        &self,
        logs: &[String],
        previous_conclusion: Option<&str>,
    ) -> Result<Assisted<MonthlySummaryOutput>> {
        let mut input = json!({"logs": logs});
        if let Some(previous) = previous_conclusion {
            input["previous_conclusion"] = json!(previous);
        }
        self.call(tasks::summary::NAME, input).await
    }
}

/// Builder for [`LogbookAssistant`].
pub struct LogbookAssistantBuilder {
    gateway: GatewayBuilder,
}

impl LogbookAssistantBuilder {
    pub fn new() -> Self {
        Self {
            gateway: Gateway::builder(),
        }
    }

    /// Use an HTTP backend with the given connection settings.
    pub fn http_backend(mut self, settings: BackendSettings) -> Result<Self> {
        let backend = HttpBackend::new(settings)?;
        self.gateway = self.gateway.backend(Arc::new(backend));
        Ok(self)
    }

    /// Inject a backend directly (tests substitute a double here).
    pub fn backend(mut self, backend: Arc<dyn GenerationBackend>) -> Self {
        self.gateway = self.gateway.backend(backend);
        self
    }

    /// Upper bound on one generation attempt.
    pub fn attempt_timeout(mut self, timeout: Duration) -> Self {
        self.gateway = self.gateway.attempt_timeout(timeout);
        self
    }

    pub fn build(self) -> Result<LogbookAssistant> {
        let gateway = self.gateway.registry(tasks::default_registry()).build()?;
        Ok(LogbookAssistant { gateway })
    }
}

impl Default for LogbookAssistantBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, GenerationConfig};
    use async_trait::async_trait;
    use serde_json::Value;

    struct CannedBackend(String);

    #[async_trait]
    impl GenerationBackend for CannedBackend {
        async fn generate(
            &self,
            _prompt: &str,
            _output_schema: &Value,
            _config: &GenerationConfig,
        ) -> std::result::Result<String, BackendError> {
            Ok(self.0.clone())
        }
    }

    fn assistant_with(response: &str) -> LogbookAssistant {
        LogbookAssistant::builder()
            .backend(Arc::new(CannedBackend(response.to_string())))
            .build()
            .unwrap()
    }

    #[test]
    fn typed_success_decodes() {
        tokio_test::block_on(async {
            let assistant = assistant_with(r#"{"sentiment": "Positive"}"#);
            let reply = assistant.analyze_sentiment("Great day.").await.unwrap();
            assert_eq!(reply.output.sentiment, crate::tasks::Sentiment::Positive);
            assert_eq!(reply.fallback, None);
        });
    }

    #[tokio::test]
    async fn typed_fallback_decodes_with_reason() {
        // Backend answers with a skills shape; the sentiment task rejects it.
        let assistant = assistant_with(r#"{"skills": []}"#);
        let reply = assistant.analyze_sentiment("Great day.").await.unwrap();
        assert_eq!(reply.output.sentiment, crate::tasks::Sentiment::Neutral);
        assert_eq!(reply.fallback, Some(FallbackReason::SchemaMismatch));
    }

    #[tokio::test]
    async fn monthly_summary_input_shape() {
        let assistant = assistant_with(
            r#"{"introduction": "i", "duties": "d", "problems": "p", "analysis": "a", "conclusion": "c"}"#,
        );
        let logs = vec!["Day one.".to_string(), "Day two.".to_string()];
        let reply = assistant
            .generate_monthly_summary(&logs, Some("Last month went well."))
            .await
            .unwrap();
        assert_eq!(reply.fallback, None);
        assert_eq!(reply.output.duties, "d");
    }
}
