//! Item storage.

mod in_memory;

pub use in_memory::InMemoryItemStore;

use playforge_core::{Item, ItemId, ItemStatus, ReviewVerdict};

/// Storage key of an item row.
///
/// `(item_id, version)` uniquely identifies a row; `version` is always 1 in
/// current flows and reserved for future regenerate-in-place.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub item_id: ItemId,
    pub version: u32,
}

impl ItemKey {
    pub fn new(item_id: ItemId, version: u32) -> Self {
        Self { item_id, version }
    }

    pub fn of(item: &Item) -> Self {
        Self::new(item.item_id.clone(), item.version)
    }
}

/// Ordering over the `(status, created_at)` index.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum QueryOrder {
    /// Oldest first (moderation queue order).
    OldestFirst,
    /// Newest first (serving order).
    NewestFirst,
}

/// Item store error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ItemStoreError {
    #[error("item not found: {item_id} v{version}")]
    NotFound { item_id: ItemId, version: u32 },
    #[error("storage error: {0}")]
    Storage(String),
}

/// Item store abstraction.
///
/// Backed by native atomic single-row operations; concurrent writers to the
/// same key resolve last-write-wins. No multi-row transactions exist — every
/// generation task writes exactly one row.
pub trait ItemStore: Send + Sync {
    /// Unconditional write of a `(item_id, version)` row.
    ///
    /// No existence check: ids are freshly generated per task, so overwrite
    /// collisions are not expected in practice, and not structurally
    /// prevented.
    fn put(&self, item: Item) -> Result<(), ItemStoreError>;

    /// Point read of one row.
    fn get(&self, item_id: &ItemId, version: u32) -> Result<Option<Item>, ItemStoreError>;

    /// Read rows of one status ordered by `created_at`.
    ///
    /// This is the `(status, created_at)` index contract: moderation lists
    /// PENDING oldest-first, serving reads APPROVED newest-first capped at
    /// its window.
    fn query_by_status(
        &self,
        status: ItemStatus,
        limit: Option<usize>,
        order: QueryOrder,
    ) -> Result<Vec<Item>, ItemStoreError>;

    /// Apply a review transition to one row.
    ///
    /// The target is restricted to APPROVED/REJECTED by the verdict type.
    /// The row's *current* status is deliberately not checked first, so a
    /// second review overwrites the first (terminal by convention only).
    fn update_status(
        &self,
        item_id: &ItemId,
        version: u32,
        verdict: ReviewVerdict,
        reviewer: Option<String>,
        comment: Option<String>,
    ) -> Result<Item, ItemStoreError>;

    /// Unpaginated full scan; used only by stats aggregation.
    ///
    /// Known scalability gap: a real backend would page this, and counts
    /// degrade silently past the backend page size.
    fn scan_all(&self) -> Result<Vec<Item>, ItemStoreError>;
}
