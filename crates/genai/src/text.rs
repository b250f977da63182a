//! Text-generation service client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Text-generation failure.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Transport or service-side failure (the call itself went wrong).
    #[error("text generation service call failed: {0}")]
    Service(String),

    /// The service answered, but the output is not in the expected format.
    /// Never auto-retried; the task fails and nothing is persisted.
    #[error("generated output is not in the expected format: {0}")]
    Format(String),
}

/// Single-turn text generation with a bounded output budget.
///
/// Implementations own the wire envelope and return the extracted completion
/// text; callers parse and validate it.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, GenerationError>;
}

/// Configuration for [`HttpTextGenerator`].
#[derive(Debug, Clone)]
pub struct TextGenConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub connect_timeout: Duration,
    pub total_timeout: Duration,
}

impl Default for TextGenConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9090".to_string(),
            api_key: None,
            connect_timeout: Duration::from_secs(5),
            total_timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequestBody<'a> {
    prompt: &'a str,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponseBody {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// JSON-over-HTTP text generation client.
///
/// Issues one `POST {base_url}/v1/generate` per call; no retries.
#[derive(Debug, Clone)]
pub struct HttpTextGenerator {
    client: reqwest::Client,
    config: TextGenConfig,
}

impl HttpTextGenerator {
    pub fn new(config: TextGenConfig) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.total_timeout)
            .build()
            .map_err(|e| GenerationError::Service(format!("failed to build http client: {e}")))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/generate", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, GenerationError> {
        tracing::debug!(prompt_len = prompt.len(), max_tokens, "calling text generation service");

        let mut request = self
            .client
            .post(self.endpoint())
            .json(&GenerateRequestBody { prompt, max_tokens });

        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GenerationError::Service(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Service(format!(
                "text generation service returned {status}: {body}"
            )));
        }

        let envelope: GenerateResponseBody = response
            .json()
            .await
            .map_err(|e| GenerationError::Format(format!("unparsable service envelope: {e}")))?;

        envelope
            .content
            .into_iter()
            .map(|block| block.text)
            .find(|text| !text.trim().is_empty())
            .ok_or_else(|| GenerationError::Format("service envelope contained no text".to_string()))
    }
}

/// Canned-response generator for tests/dev.
#[derive(Debug, Clone)]
pub struct StaticTextGenerator {
    body: String,
}

impl StaticTextGenerator {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// Convenience: respond with the given value serialized as JSON text.
    pub fn json(value: &serde_json::Value) -> Self {
        Self::new(value.to_string())
    }
}

#[async_trait]
impl TextGenerator for StaticTextGenerator {
    async fn generate(&self, _prompt: &str, _max_tokens: u32) -> Result<String, GenerationError> {
        Ok(self.body.clone())
    }
}
