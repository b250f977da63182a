//! Fan-out batch orchestrator.
//!
//! Expands a batch request into N independent generation tasks and returns
//! immediately. There is no completion channel back to the requester:
//! callers observe progress by querying the item store.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::time::Instant;
use tracing::{info, warn};

use playforge_core::{BatchId, ContentType};

use crate::generator::GeneratorTask;

/// Orchestrator configuration.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Cap on simultaneously in-flight tasks per batch (external service
    /// rate limits).
    pub max_concurrent: usize,
    /// Wall-clock budget shared by every task of a batch; a task that has
    /// not finished by the batch deadline fails alone.
    pub batch_budget: Duration,
    /// Name for logging.
    pub name: String,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 4,
            batch_budget: Duration::from_secs(15 * 60),
            name: "batch-orchestrator".to_string(),
        }
    }
}

impl OrchestratorConfig {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = max.max(1);
        self
    }

    pub fn with_batch_budget(mut self, budget: Duration) -> Self {
        self.batch_budget = budget;
        self
    }
}

/// One generation task's parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDescriptor {
    pub content_type: ContentType,
    pub lang: String,
}

impl TaskDescriptor {
    /// Apply the documented request defaults (word_search / "en").
    pub fn from_request(content_type: Option<ContentType>, lang: Option<String>) -> Self {
        Self {
            content_type: content_type.unwrap_or(ContentType::WordSearch),
            lang: lang.unwrap_or_else(|| "en".to_string()),
        }
    }
}

/// Opaque handle returned to the batch requester.
///
/// Holds no cancellation power and no completion signal.
#[derive(Debug, Clone, Serialize)]
pub struct BatchHandle {
    pub batch_id: BatchId,
    pub requested: usize,
}

/// Dispatches generation batches.
pub struct BatchOrchestrator {
    generator: Arc<GeneratorTask>,
    config: OrchestratorConfig,
}

impl BatchOrchestrator {
    pub fn new(generator: Arc<GeneratorTask>, config: OrchestratorConfig) -> Self {
        Self { generator, config }
    }

    /// Dispatch `count` independent generation tasks and return immediately.
    ///
    /// Tasks run concurrently up to `max_concurrent`; each one is bounded by
    /// the batch deadline. A failing or timed-out task is logged and never
    /// aborts or delays its siblings. Must be called on a tokio runtime.
    pub fn request_batch(
        &self,
        count: usize,
        content_type: Option<ContentType>,
        lang: Option<String>,
    ) -> BatchHandle {
        let batch_id = BatchId::new();
        let descriptor = TaskDescriptor::from_request(content_type, lang);
        let deadline = Instant::now() + self.config.batch_budget;
        let permits = Arc::new(Semaphore::new(self.config.max_concurrent));

        info!(
            orchestrator = %self.config.name,
            batch = %batch_id,
            count,
            content_type = %descriptor.content_type,
            lang = %descriptor.lang,
            "dispatching generation batch"
        );

        for task_no in 0..count {
            let generator = self.generator.clone();
            let permits = permits.clone();
            let descriptor = descriptor.clone();

            tokio::spawn(async move {
                // The semaphore only closes when the batch is dropped wholesale.
                let _permit = match permits.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return,
                };

                let result = tokio::time::timeout_at(
                    deadline,
                    generator.generate(descriptor.content_type, &descriptor.lang),
                )
                .await;

                match result {
                    Ok(Ok(item)) => {
                        info!(batch = %batch_id, task = task_no, item = %item.item_id, "generation task completed");
                    }
                    Ok(Err(e)) => {
                        warn!(batch = %batch_id, task = task_no, error = %e, "generation task failed");
                    }
                    Err(_) => {
                        warn!(batch = %batch_id, task = task_no, "generation task exceeded batch budget");
                    }
                }
            });
        }

        BatchHandle {
            batch_id,
            requested: count,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::json;

    use playforge_core::ItemStatus;
    use playforge_genai::{
        GenerationError, StaticImageGenerator, StaticTextGenerator, TextGenerator,
    };

    use crate::assets::InMemoryAssetStore;
    use crate::generator::GeneratorTaskConfig;
    use crate::item_store::{InMemoryItemStore, ItemStore, QueryOrder};
    use crate::prompt_store::InMemoryPromptConfigStore;

    use super::*;

    fn orchestrator_with(
        text: Arc<dyn TextGenerator>,
        config: OrchestratorConfig,
    ) -> (BatchOrchestrator, Arc<InMemoryItemStore>) {
        let items = Arc::new(InMemoryItemStore::new());
        let generator = Arc::new(GeneratorTask::new(
            text,
            Arc::new(StaticImageGenerator::new(vec![1])),
            Arc::new(InMemoryAssetStore::default()),
            Arc::new(InMemoryPromptConfigStore::new()),
            items.clone(),
            GeneratorTaskConfig::default(),
        ));
        (BatchOrchestrator::new(generator, config), items)
    }

    fn quiz_body() -> String {
        json!({
            "type": "quiz_mcq",
            "lang": "en",
            "spec": {"questions": [1, 2, 3, 4, 5]}
        })
        .to_string()
    }

    async fn wait_for_pending(items: &InMemoryItemStore, expected: usize) -> Vec<playforge_core::Item> {
        for _ in 0..200 {
            let pending = items
                .query_by_status(ItemStatus::Pending, None, QueryOrder::OldestFirst)
                .unwrap();
            if pending.len() >= expected {
                return pending;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("expected {expected} pending items, store never caught up");
    }

    #[tokio::test]
    async fn batch_of_n_yields_n_rows() {
        let (orchestrator, items) = orchestrator_with(
            Arc::new(StaticTextGenerator::new(quiz_body())),
            OrchestratorConfig::default(),
        );

        let handle = orchestrator.request_batch(3, Some(ContentType::QuizMcq), None);
        assert_eq!(handle.requested, 3);

        let pending = wait_for_pending(&items, 3).await;
        assert_eq!(pending.len(), 3);
        for item in &pending {
            assert_eq!(item.content_type, ContentType::QuizMcq);
            assert_eq!(item.version, 1);
        }
        // Distinct identities per task.
        let mut ids: Vec<_> = pending.iter().map(|i| i.item_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    /// Generator that fails on even-numbered invocations.
    struct FlakyTextGenerator {
        body: String,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextGenerator for FlakyTextGenerator {
        async fn generate(&self, _prompt: &str, _max_tokens: u32) -> Result<String, GenerationError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call % 2 == 0 {
                Err(GenerationError::Service("synthetic outage".to_string()))
            } else {
                Ok(self.body.clone())
            }
        }
    }

    #[tokio::test]
    async fn task_failures_do_not_abort_siblings() {
        let text = Arc::new(FlakyTextGenerator {
            body: quiz_body(),
            calls: AtomicUsize::new(0),
        });
        let (orchestrator, items) = orchestrator_with(text.clone(), OrchestratorConfig::default());

        orchestrator.request_batch(4, Some(ContentType::QuizMcq), None);

        // Half the tasks fail; the other half still lands.
        let pending = wait_for_pending(&items, 2).await;
        assert_eq!(pending.len(), 2);
        assert_eq!(text.calls.load(Ordering::SeqCst), 4);
    }

    /// Generator that records the high-water mark of concurrent calls.
    struct ConcurrencyProbe {
        body: String,
        current: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl TextGenerator for ConcurrencyProbe {
        async fn generate(&self, _prompt: &str, _max_tokens: u32) -> Result<String, GenerationError> {
            let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.current.fetch_sub(1, Ordering::SeqCst);
            Ok(self.body.clone())
        }
    }

    #[tokio::test]
    async fn concurrency_cap_bounds_in_flight_tasks() {
        let probe = Arc::new(ConcurrencyProbe {
            body: quiz_body(),
            current: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        });
        let (orchestrator, items) = orchestrator_with(
            probe.clone(),
            OrchestratorConfig::default().with_max_concurrent(2),
        );

        orchestrator.request_batch(6, Some(ContentType::QuizMcq), None);

        wait_for_pending(&items, 6).await;
        assert!(probe.peak.load(Ordering::SeqCst) <= 2);
    }

    /// Generator that never completes (until the deadline cancels it).
    struct StallingTextGenerator;

    #[async_trait]
    impl TextGenerator for StallingTextGenerator {
        async fn generate(&self, _prompt: &str, _max_tokens: u32) -> Result<String, GenerationError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            unreachable!("the batch deadline cancels this task first");
        }
    }

    #[tokio::test]
    async fn deadline_fails_the_task_without_persisting() {
        let (orchestrator, items) = orchestrator_with(
            Arc::new(StallingTextGenerator),
            OrchestratorConfig::default().with_batch_budget(Duration::from_millis(50)),
        );

        orchestrator.request_batch(2, None, None);
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn defaults_are_word_search_in_english() {
        let descriptor = TaskDescriptor::from_request(None, None);
        assert_eq!(descriptor.content_type, ContentType::WordSearch);
        assert_eq!(descriptor.lang, "en");
    }
}
