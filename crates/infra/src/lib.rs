//! `playforge-infra` — stores and orchestration for the generation pipeline.
//!
//! Storage traits with in-memory reference implementations, the generator
//! task that drives the external AI boundary, the fan-out batch
//! orchestrator, and the read-side components (review, stats, random
//! serving).

pub mod assets;
pub mod generator;
pub mod item_store;
pub mod orchestrator;
pub mod prompt_store;
pub mod reviewer;
pub mod serving;
pub mod stats;

pub use assets::{AssetStore, AssetStoreError, InMemoryAssetStore};
pub use generator::{GenerateError, GeneratorTask, GeneratorTaskConfig};
pub use item_store::{
    InMemoryItemStore, ItemKey, ItemStore, ItemStoreError, QueryOrder,
};
pub use orchestrator::{BatchHandle, BatchOrchestrator, OrchestratorConfig, TaskDescriptor};
pub use prompt_store::{InMemoryPromptConfigStore, PromptConfigStore, PromptStoreError};
pub use reviewer::{ReviewError, ReviewOutcome, ReviewRequest, Reviewer};
pub use serving::{RandomServer, ServeError, SERVE_WINDOW};
pub use stats::{ItemStats, StatsAggregator, StatusCounts};
