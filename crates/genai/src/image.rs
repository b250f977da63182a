//! Image-generation service client and the static fallback set.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed creative prompt used for every jigsaw illustration.
pub const JIGSAW_IMAGE_PROMPT: &str = "A vibrant, family-friendly illustration of a scenic \
landscape with bold shapes and rich colors, well suited to being cut into jigsaw pieces.";

/// Backup images used when generation fails for any reason.
///
/// One attempt, then a uniformly-random pick from this set; never retried,
/// never blocks item creation.
pub const FALLBACK_IMAGE_URLS: [&str; 4] = [
    "https://assets.playforge.dev/fallback/jigsaw-meadow.jpg",
    "https://assets.playforge.dev/fallback/jigsaw-harbor.jpg",
    "https://assets.playforge.dev/fallback/jigsaw-mountain.jpg",
    "https://assets.playforge.dev/fallback/jigsaw-lagoon.jpg",
];

/// Uniform pick from [`FALLBACK_IMAGE_URLS`].
pub fn random_fallback_image_url() -> &'static str {
    let idx = rand::rng().random_range(0..FALLBACK_IMAGE_URLS.len());
    FALLBACK_IMAGE_URLS[idx]
}

/// Image-generation failure.
///
/// Always recovered locally via the static fallback; it never surfaces to
/// callers of the generation pipeline.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image generation service call failed: {0}")]
    Service(String),

    #[error("image generation service returned no image")]
    MissingImage,

    #[error("image payload could not be decoded: {0}")]
    Decode(String),
}

/// One-shot image generation returning raw bytes.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, ImageError>;
}

/// Configuration for [`HttpImageGenerator`].
#[derive(Debug, Clone)]
pub struct ImageGenConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub connect_timeout: Duration,
    pub total_timeout: Duration,
}

impl Default for ImageGenConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9091".to_string(),
            api_key: None,
            connect_timeout: Duration::from_secs(5),
            total_timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Debug, Serialize)]
struct ImageRequestBody<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponseBody {
    /// Base64-encoded images; only the first is used.
    #[serde(default)]
    images: Vec<String>,
}

/// JSON-over-HTTP image generation client.
///
/// Issues one `POST {base_url}/v1/images` per call; no retries.
#[derive(Debug, Clone)]
pub struct HttpImageGenerator {
    client: reqwest::Client,
    config: ImageGenConfig,
}

impl HttpImageGenerator {
    pub fn new(config: ImageGenConfig) -> Result<Self, ImageError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.total_timeout)
            .build()
            .map_err(|e| ImageError::Service(format!("failed to build http client: {e}")))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/images", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ImageGenerator for HttpImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, ImageError> {
        tracing::debug!(prompt_len = prompt.len(), "calling image generation service");

        let mut request = self
            .client
            .post(self.endpoint())
            .json(&ImageRequestBody { prompt });

        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ImageError::Service(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImageError::Service(format!(
                "image generation service returned {status}: {body}"
            )));
        }

        let envelope: ImageResponseBody = response
            .json()
            .await
            .map_err(|e| ImageError::Decode(format!("unparsable service envelope: {e}")))?;

        let first = envelope.images.into_iter().next().ok_or(ImageError::MissingImage)?;

        BASE64
            .decode(first.as_bytes())
            .map_err(|e| ImageError::Decode(e.to_string()))
    }
}

/// Canned-bytes generator for tests/dev.
#[derive(Debug, Clone)]
pub struct StaticImageGenerator {
    bytes: Vec<u8>,
}

impl StaticImageGenerator {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

#[async_trait]
impl ImageGenerator for StaticImageGenerator {
    async fn generate(&self, _prompt: &str) -> Result<Vec<u8>, ImageError> {
        Ok(self.bytes.clone())
    }
}
