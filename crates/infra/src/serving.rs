//! Random serving of approved items.

use std::sync::Arc;

use rand::Rng;

use playforge_core::{Item, ItemStatus};

use crate::item_store::{ItemStore, ItemStoreError, QueryOrder};

/// Size of the recent-approvals window the random pick samples from.
///
/// Sampling is uniform over this page only, not the full APPROVED
/// population — a deliberate accuracy/cost tradeoff.
pub const SERVE_WINDOW: usize = 100;

/// Serving failure.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("no approved items available")]
    NotFound,
    #[error(transparent)]
    Store(#[from] ItemStoreError),
}

/// Serves a uniformly chosen APPROVED item from the recent window.
pub struct RandomServer {
    items: Arc<dyn ItemStore>,
}

impl RandomServer {
    pub fn new(items: Arc<dyn ItemStore>) -> Self {
        Self { items }
    }

    pub fn serve_random(&self) -> Result<Item, ServeError> {
        let page = self.items.query_by_status(
            ItemStatus::Approved,
            Some(SERVE_WINDOW),
            QueryOrder::NewestFirst,
        )?;

        if page.is_empty() {
            return Err(ServeError::NotFound);
        }

        let idx = rand::rng().random_range(0..page.len());
        Ok(page[idx].clone())
    }
}
