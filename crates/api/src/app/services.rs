//! Infrastructure wiring for the HTTP app.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use playforge_genai::{
    HttpImageGenerator, HttpTextGenerator, ImageGenConfig, ImageGenerator, TextGenConfig,
    TextGenerator,
};
use playforge_infra::{
    AssetStore, BatchOrchestrator, GeneratorTask, GeneratorTaskConfig, InMemoryAssetStore,
    InMemoryItemStore, InMemoryPromptConfigStore, ItemStore, OrchestratorConfig, PromptConfigStore,
    RandomServer, Reviewer, StatsAggregator,
};

/// Knobs for service wiring, all overridable from the environment.
#[derive(Debug, Clone)]
pub struct ServicesConfig {
    pub orchestrator: OrchestratorConfig,
    pub generator: GeneratorTaskConfig,
    pub asset_base_url: String,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            orchestrator: OrchestratorConfig::default(),
            generator: GeneratorTaskConfig::default(),
            asset_base_url: "https://assets.playforge.dev".to_string(),
        }
    }
}

/// All long-lived application services shared by the handlers.
pub struct AppServices {
    pub items: Arc<dyn ItemStore>,
    pub prompts: Arc<dyn PromptConfigStore>,
    pub orchestrator: BatchOrchestrator,
    pub reviewer: Reviewer,
    pub stats: StatsAggregator,
    pub random: RandomServer,
}

/// Wire the full service graph around the given external generators.
///
/// Stores are the in-memory reference implementations; every read-side
/// component shares the same item store.
pub fn build_services(
    text: Arc<dyn TextGenerator>,
    images: Arc<dyn ImageGenerator>,
    config: ServicesConfig,
) -> Arc<AppServices> {
    let items: Arc<dyn ItemStore> = Arc::new(InMemoryItemStore::new());
    let prompts: Arc<dyn PromptConfigStore> = Arc::new(InMemoryPromptConfigStore::new());
    let assets: Arc<dyn AssetStore> = Arc::new(InMemoryAssetStore::new(config.asset_base_url));

    let generator = Arc::new(GeneratorTask::new(
        text,
        images,
        assets,
        prompts.clone(),
        items.clone(),
        config.generator,
    ));

    Arc::new(AppServices {
        orchestrator: BatchOrchestrator::new(generator, config.orchestrator),
        reviewer: Reviewer::new(items.clone()),
        stats: StatsAggregator::new(items.clone()),
        random: RandomServer::new(items.clone()),
        items,
        prompts,
    })
}

/// Wire services from the environment (production entrypoint).
///
/// `GENERATION_API_URL` / `IMAGE_API_URL` point at the external generation
/// services; unset values fall back to dev defaults with a warning.
pub fn build_services_from_env() -> anyhow::Result<Arc<AppServices>> {
    let text_config = TextGenConfig {
        base_url: env_or_dev_default("GENERATION_API_URL", "http://localhost:9090"),
        api_key: std::env::var("GENERATION_API_KEY").ok(),
        ..Default::default()
    };
    let image_config = ImageGenConfig {
        base_url: env_or_dev_default("IMAGE_API_URL", "http://localhost:9091"),
        api_key: std::env::var("IMAGE_API_KEY").ok(),
        ..Default::default()
    };

    let text = HttpTextGenerator::new(text_config).context("text generation client")?;
    let images = HttpImageGenerator::new(image_config).context("image generation client")?;

    let mut config = ServicesConfig::default();
    if let Ok(url) = std::env::var("ASSET_BASE_URL") {
        config.asset_base_url = url;
    }
    if let Some(max) = env_parse::<usize>("BATCH_MAX_CONCURRENT") {
        config.orchestrator = config.orchestrator.with_max_concurrent(max);
    }
    if let Some(secs) = env_parse::<u64>("BATCH_BUDGET_SECS") {
        config.orchestrator = config.orchestrator.with_batch_budget(Duration::from_secs(secs));
    }
    if let Some(max) = env_parse::<u32>("GENERATION_MAX_OUTPUT_TOKENS") {
        config.generator = config.generator.with_max_output_tokens(max);
    }

    Ok(build_services(Arc::new(text), Arc::new(images), config))
}

fn env_or_dev_default(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| {
        tracing::warn!("{name} not set; using dev default {default}");
        default.to_string()
    })
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
