//! Prompt configuration storage.

use std::sync::RwLock;

/// Prompt store error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PromptStoreError {
    #[error("prompt must not be empty")]
    EmptyPrompt,
    #[error("storage error: {0}")]
    Storage(String),
}

/// Single-row store for the generation prompt template.
///
/// Strongly-consistent read of one mutable row; `set` overwrites in place
/// with no versioning and no concurrency control (last-write-wins).
pub trait PromptConfigStore: Send + Sync {
    /// The configured template; empty string when nothing was ever set.
    fn get(&self) -> Result<String, PromptStoreError>;

    /// Overwrite the template. Empty input is rejected.
    fn set(&self, prompt: &str) -> Result<(), PromptStoreError>;
}

/// In-memory prompt store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryPromptConfigStore {
    prompt: RwLock<Option<String>>,
}

impl InMemoryPromptConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PromptConfigStore for InMemoryPromptConfigStore {
    fn get(&self) -> Result<String, PromptStoreError> {
        let prompt = self
            .prompt
            .read()
            .map_err(|_| PromptStoreError::Storage("lock poisoned".to_string()))?;
        Ok(prompt.clone().unwrap_or_default())
    }

    fn set(&self, prompt: &str) -> Result<(), PromptStoreError> {
        if prompt.trim().is_empty() {
            return Err(PromptStoreError::EmptyPrompt);
        }
        let mut row = self
            .prompt
            .write()
            .map_err(|_| PromptStoreError::Storage("lock poisoned".to_string()))?;
        *row = Some(prompt.to_string());
        Ok(())
    }
}
