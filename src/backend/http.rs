//! HTTP adapter for OpenAI-style chat-completion endpoints.

use crate::backend::{BackendError, GenerationBackend, GenerationConfig};
use crate::Error;
use async_trait::async_trait;
use keyring::Entry;
use serde_json::{json, Value};
use std::env;
use std::time::Duration;
use uuid::Uuid;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Immutable connection configuration for one backend.
///
/// Constructed explicitly once at process start and handed to
/// [`HttpBackend::new`] — there is no ambient global model state, which keeps
/// the adapter substitutable in tests.
#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub model: String,
    /// Explicit API key. When absent, the key is resolved from the OS keyring
    /// and then the `{PROVIDER}_API_KEY` environment variable.
    pub api_key: Option<String>,
    /// Credential lookup namespace (keyring account / env-var prefix)
    pub provider_id: String,
    /// Client-level request timeout
    pub timeout: Duration,
}

impl BackendSettings {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key: None,
            provider_id: "openai".to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_provider_id(mut self, provider_id: impl Into<String>) -> Self {
        self.provider_id = provider_id.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = &self.api_key {
            return Some(key.clone());
        }

        if let Ok(entry) = Entry::new("structcall", &self.provider_id) {
            if let Ok(key) = entry.get_password() {
                return Some(key);
            }
        }

        let env_var = format!("{}_API_KEY", self.provider_id.to_uppercase());
        env::var(env_var).ok()
    }
}

/// Generation backend over an OpenAI-compatible `/chat/completions` endpoint.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl HttpBackend {
    pub fn new(settings: BackendSettings) -> crate::Result<Self> {
        let api_key = settings.resolve_api_key();
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| Error::configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model,
            api_key,
        })
    }

    fn request_body(&self, prompt: &str, output_schema: &Value, config: &GenerationConfig) -> Value {
        json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": config.temperature,
            "max_tokens": config.max_output_tokens,
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "task_output",
                    "strict": true,
                    "schema": output_schema
                }
            }
        })
    }

    fn extract_content(body: &Value) -> Result<String, BackendError> {
        body.pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| BackendError::MalformedResponse(body.to_string()))
    }
}

#[async_trait]
impl GenerationBackend for HttpBackend {
    async fn generate(
        &self,
        prompt: &str,
        output_schema: &Value,
        config: &GenerationConfig,
    ) -> Result<String, BackendError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = self.request_body(prompt, output_schema, config);
        let request_id = Uuid::new_v4().to_string();

        let mut request = self
            .client
            .post(&url)
            .json(&body)
            .header("x-structcall-request-id", &request_id);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        Self::extract_content(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> HttpBackend {
        HttpBackend::new(
            BackendSettings::new("https://api.example.com/v1/", "test-model")
                .with_api_key("test-key"),
        )
        .unwrap()
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let backend = backend();
        assert_eq!(backend.base_url, "https://api.example.com/v1");
    }

    #[test]
    fn request_body_carries_schema_hint() {
        let backend = backend();
        let schema = json!({"type": "object", "properties": {"sentiment": {"type": "string"}}});
        let config = GenerationConfig::new(0.2, 64);

        let body = backend.request_body("classify this", &schema, &config);
        assert_eq!(body["model"], "test-model");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "classify this");
        assert_eq!(body["max_tokens"], 64);
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["schema"], schema);
        assert_eq!(body["response_format"]["json_schema"]["strict"], true);
    }

    #[test]
    fn extract_content_from_completion_shape() {
        let body = json!({
            "choices": [{"message": {"role": "assistant", "content": "{\"sentiment\":\"Positive\"}"}}]
        });
        let content = HttpBackend::extract_content(&body).unwrap();
        assert_eq!(content, "{\"sentiment\":\"Positive\"}");
    }

    #[test]
    fn extract_content_rejects_empty_choices() {
        let body = json!({"choices": []});
        assert!(matches!(
            HttpBackend::extract_content(&body),
            Err(BackendError::MalformedResponse(_))
        ));
    }
}
