//! Generation task: one external call, one validated item, one row.

use std::sync::Arc;

use anyhow::Context;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use playforge_core::{ContentType, Item, ItemId};
use playforge_genai::{
    parse_generated_content, random_fallback_image_url, GenerationError, ImageGenerator,
    PromptTemplate, TextGenerator, JIGSAW_IMAGE_PROMPT,
};

use crate::assets::AssetStore;
use crate::item_store::{ItemStore, ItemStoreError};
use crate::prompt_store::{PromptConfigStore, PromptStoreError};

/// Generation task failure.
///
/// Image failures are absent on purpose: they are recovered locally via the
/// static fallback and never surface.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// The assembled item failed the final completeness gate.
    #[error("generated item is incomplete: {0}")]
    Incomplete(String),

    #[error(transparent)]
    Store(#[from] ItemStoreError),

    #[error(transparent)]
    PromptStore(#[from] PromptStoreError),
}

/// Generator task configuration.
#[derive(Debug, Clone)]
pub struct GeneratorTaskConfig {
    /// Output-length budget passed to the text-generation service.
    pub max_output_tokens: u32,
}

impl Default for GeneratorTaskConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: 2048,
        }
    }
}

impl GeneratorTaskConfig {
    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = max;
        self
    }
}

/// Produces one new content item per call.
///
/// Pipeline: prompt load → render → single-turn text generation → parse →
/// identity assignment → type-specific enrichment → completeness gate →
/// unconditional put. No step retries; either a complete item is persisted
/// or nothing is.
pub struct GeneratorTask {
    text: Arc<dyn TextGenerator>,
    images: Arc<dyn ImageGenerator>,
    assets: Arc<dyn AssetStore>,
    prompts: Arc<dyn PromptConfigStore>,
    items: Arc<dyn ItemStore>,
    config: GeneratorTaskConfig,
}

impl GeneratorTask {
    pub fn new(
        text: Arc<dyn TextGenerator>,
        images: Arc<dyn ImageGenerator>,
        assets: Arc<dyn AssetStore>,
        prompts: Arc<dyn PromptConfigStore>,
        items: Arc<dyn ItemStore>,
        config: GeneratorTaskConfig,
    ) -> Self {
        Self {
            text,
            images,
            assets,
            prompts,
            items,
            config,
        }
    }

    /// Generate and persist one PENDING item of the requested type/language.
    pub async fn generate(&self, requested: ContentType, lang: &str) -> Result<Item, GenerateError> {
        let configured = self.prompts.get()?;
        let template = PromptTemplate::or_default(&configured);
        let prompt = template.render(requested, lang);

        let completion = self
            .text
            .generate(&prompt, self.config.max_output_tokens)
            .await?;
        let content = parse_generated_content(&completion)?;

        let mut item = Item::new_pending(content.content_type, content.lang, content.spec);

        if item.content_type == ContentType::Jigsaw {
            self.enrich_jigsaw(&mut item).await;
        }

        if let Err(reason) = completeness_gate(&item) {
            return Err(GenerateError::Incomplete(reason));
        }

        self.items.put(item.clone())?;
        debug!(item = %item.item_id, content_type = %item.content_type, "generated item persisted");
        Ok(item)
    }

    /// One image attempt, then the static fallback. Never retried, never
    /// blocks creation, never surfaces an error.
    async fn enrich_jigsaw(&self, item: &mut Item) {
        let image_url = match self.generate_jigsaw_asset(&item.item_id).await {
            Ok(url) => url,
            Err(e) => {
                warn!(item = %item.item_id, error = %format!("{e:#}"), "image generation failed; using fallback image");
                random_fallback_image_url().to_string()
            }
        };

        match item.spec.as_object_mut() {
            Some(spec) => {
                spec.insert("imageUrl".to_string(), JsonValue::String(image_url));
            }
            None => {
                debug!(item = %item.item_id, "jigsaw spec is not an object; imageUrl not rewritten");
            }
        }
    }

    async fn generate_jigsaw_asset(&self, item_id: &ItemId) -> anyhow::Result<String> {
        let bytes = self
            .images
            .generate(JIGSAW_IMAGE_PROMPT)
            .await
            .context("image generation call")?;
        if bytes.is_empty() {
            anyhow::bail!("image generation returned empty payload");
        }
        let key = format!("items/{item_id}.png");
        let url = self
            .assets
            .put_object(&key, bytes, "image/png")
            .context("asset upload")?;
        Ok(url)
    }
}

/// Final validation before persistence: non-empty lang and a non-degenerate
/// spec payload (the content type is already statically typed).
fn completeness_gate(item: &Item) -> Result<(), String> {
    if item.lang.trim().is_empty() {
        return Err("empty lang".to_string());
    }
    let spec_ok = match &item.spec {
        JsonValue::Null => false,
        JsonValue::Object(map) => !map.is_empty(),
        JsonValue::Array(arr) => !arr.is_empty(),
        _ => true,
    };
    if !spec_ok {
        return Err("empty spec".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::json;

    use playforge_core::ItemStatus;
    use playforge_genai::{
        ImageError, StaticImageGenerator, StaticTextGenerator, FALLBACK_IMAGE_URLS,
    };

    use crate::assets::InMemoryAssetStore;
    use crate::item_store::{InMemoryItemStore, QueryOrder};
    use crate::prompt_store::InMemoryPromptConfigStore;

    use super::*;

    struct FailingImageGenerator;

    #[async_trait]
    impl ImageGenerator for FailingImageGenerator {
        async fn generate(&self, _prompt: &str) -> Result<Vec<u8>, ImageError> {
            Err(ImageError::Service("boom".to_string()))
        }
    }

    struct RecordingTextGenerator {
        body: String,
        prompts: std::sync::Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextGenerator for RecordingTextGenerator {
        async fn generate(&self, prompt: &str, _max_tokens: u32) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.body.clone())
        }
    }

    struct Fixture {
        items: Arc<InMemoryItemStore>,
        assets: Arc<InMemoryAssetStore>,
        prompts: Arc<InMemoryPromptConfigStore>,
    }

    fn task_with(
        text: Arc<dyn TextGenerator>,
        images: Arc<dyn ImageGenerator>,
    ) -> (GeneratorTask, Fixture) {
        let items = Arc::new(InMemoryItemStore::new());
        let assets = Arc::new(InMemoryAssetStore::default());
        let prompts = Arc::new(InMemoryPromptConfigStore::new());
        let task = GeneratorTask::new(
            text,
            images,
            assets.clone(),
            prompts.clone(),
            items.clone(),
            GeneratorTaskConfig::default(),
        );
        (
            task,
            Fixture {
                items,
                assets,
                prompts,
            },
        )
    }

    fn quiz_payload() -> serde_json::Value {
        json!({
            "type": "quiz_mcq",
            "lang": "en",
            "spec": {"questions": [
                {"question": "q1", "options": ["a","b","c","d"], "answerIndex": 0},
                {"question": "q2", "options": ["a","b","c","d"], "answerIndex": 1},
                {"question": "q3", "options": ["a","b","c","d"], "answerIndex": 2},
                {"question": "q4", "options": ["a","b","c","d"], "answerIndex": 3},
                {"question": "q5", "options": ["a","b","c","d"], "answerIndex": 0},
            ]}
        })
    }

    #[tokio::test]
    async fn generates_and_persists_a_pending_item() {
        let text = Arc::new(StaticTextGenerator::json(&quiz_payload()));
        let (task, fx) = task_with(text, Arc::new(StaticImageGenerator::new(vec![1])));

        let item = task.generate(ContentType::QuizMcq, "en").await.unwrap();

        assert_eq!(item.status, ItemStatus::Pending);
        assert_eq!(item.version, 1);
        assert_eq!(item.content_type, ContentType::QuizMcq);
        assert!(item.spec["questions"].as_array().unwrap().len() >= 5);

        let stored = fx.items.get(&item.item_id, 1).unwrap().unwrap();
        assert_eq!(stored, item);
    }

    #[tokio::test]
    async fn configured_prompt_template_is_rendered() {
        let text = Arc::new(RecordingTextGenerator {
            body: quiz_payload().to_string(),
            prompts: std::sync::Mutex::new(Vec::new()),
        });
        let (task, fx) = task_with(text.clone(), Arc::new(StaticImageGenerator::new(vec![1])));

        fx.prompts.set("custom: {{type}} / {{lang}}").unwrap();
        task.generate(ContentType::TrueFalse, "de").await.unwrap();

        let seen = text.prompts.lock().unwrap().clone();
        assert_eq!(seen, vec!["custom: true_false / de".to_string()]);
    }

    #[tokio::test]
    async fn default_template_is_used_when_config_is_empty() {
        let text = Arc::new(RecordingTextGenerator {
            body: quiz_payload().to_string(),
            prompts: std::sync::Mutex::new(Vec::new()),
        });
        let (task, _fx) = task_with(text.clone(), Arc::new(StaticImageGenerator::new(vec![1])));

        task.generate(ContentType::QuizMcq, "en").await.unwrap();

        let seen = text.prompts.lock().unwrap().clone();
        assert!(seen[0].contains("quiz_mcq"));
        assert!(!seen[0].contains("{{type}}"));
    }

    #[tokio::test]
    async fn unparsable_output_fails_without_persisting() {
        let text = Arc::new(StaticTextGenerator::new("I could not make a game, sorry!"));
        let (task, fx) = task_with(text, Arc::new(StaticImageGenerator::new(vec![1])));

        let err = task.generate(ContentType::QuizMcq, "en").await.unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Generation(GenerationError::Format(_))
        ));
        assert!(fx.items.is_empty());
    }

    #[tokio::test]
    async fn degenerate_spec_fails_the_completeness_gate() {
        let text = Arc::new(StaticTextGenerator::new(
            r#"{"type":"quiz_mcq","lang":"en","spec":{}}"#,
        ));
        let (task, fx) = task_with(text, Arc::new(StaticImageGenerator::new(vec![1])));

        let err = task.generate(ContentType::QuizMcq, "en").await.unwrap_err();
        assert!(matches!(err, GenerateError::Incomplete(_)));
        assert!(fx.items.is_empty());
    }

    #[tokio::test]
    async fn jigsaw_success_rewrites_image_url_to_uploaded_asset() {
        let text = Arc::new(StaticTextGenerator::new(
            r#"{"type":"jigsaw","lang":"en","spec":{"imageUrl":"placeholder","rows":4,"cols":4}}"#,
        ));
        let (task, fx) = task_with(text, Arc::new(StaticImageGenerator::new(vec![7, 7, 7])));

        let item = task.generate(ContentType::Jigsaw, "en").await.unwrap();

        let url = item.spec["imageUrl"].as_str().unwrap();
        assert_eq!(
            url,
            format!("https://assets.playforge.dev/items/{}.png", item.item_id)
        );
        assert_eq!(
            fx.assets.object_bytes(&format!("items/{}.png", item.item_id)),
            Some(vec![7, 7, 7])
        );
    }

    #[tokio::test]
    async fn jigsaw_image_failure_falls_back_and_still_creates() {
        let text = Arc::new(StaticTextGenerator::new(
            r#"{"type":"jigsaw","lang":"en","spec":{"imageUrl":"placeholder","rows":3,"cols":3}}"#,
        ));
        let (task, fx) = task_with(text, Arc::new(FailingImageGenerator));

        let item = task.generate(ContentType::Jigsaw, "en").await.unwrap();

        let url = item.spec["imageUrl"].as_str().unwrap();
        assert!(FALLBACK_IMAGE_URLS.contains(&url));
        assert!(fx.assets.is_empty());

        let pending = fx
            .items
            .query_by_status(ItemStatus::Pending, None, QueryOrder::OldestFirst)
            .unwrap();
        assert_eq!(pending.len(), 1);
    }

    #[tokio::test]
    async fn non_jigsaw_types_never_touch_the_image_service() {
        let text = Arc::new(StaticTextGenerator::json(&quiz_payload()));
        // A failing image generator proves the call never happens.
        let (task, fx) = task_with(text, Arc::new(FailingImageGenerator));

        let item = task.generate(ContentType::QuizMcq, "en").await.unwrap();
        assert_eq!(item.status, ItemStatus::Pending);
        assert!(fx.assets.is_empty());
    }
}
