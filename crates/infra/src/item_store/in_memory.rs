use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use playforge_core::{Item, ItemId, ItemStatus, ReviewVerdict};

use super::{ItemKey, ItemStore, ItemStoreError, QueryOrder};

/// In-memory item store.
///
/// Reference implementation for tests/dev; single-row atomicity comes from
/// the lock, matching the last-write-wins contract of the trait.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    items: RwLock<HashMap<ItemKey, Item>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ItemStore for InMemoryItemStore {
    fn put(&self, item: Item) -> Result<(), ItemStoreError> {
        let mut items = self
            .items
            .write()
            .map_err(|_| ItemStoreError::Storage("lock poisoned".to_string()))?;
        items.insert(ItemKey::of(&item), item);
        Ok(())
    }

    fn get(&self, item_id: &ItemId, version: u32) -> Result<Option<Item>, ItemStoreError> {
        let items = self
            .items
            .read()
            .map_err(|_| ItemStoreError::Storage("lock poisoned".to_string()))?;
        Ok(items.get(&ItemKey::new(item_id.clone(), version)).cloned())
    }

    fn query_by_status(
        &self,
        status: ItemStatus,
        limit: Option<usize>,
        order: QueryOrder,
    ) -> Result<Vec<Item>, ItemStoreError> {
        let items = self
            .items
            .read()
            .map_err(|_| ItemStoreError::Storage("lock poisoned".to_string()))?;

        let mut result: Vec<_> = items
            .values()
            .filter(|item| item.status == status)
            .cloned()
            .collect();

        // created_at ties broken by id so repeated reads return a stable order.
        result.sort_by(|a, b| {
            (a.created_at, a.item_id.as_str()).cmp(&(b.created_at, b.item_id.as_str()))
        });
        if order == QueryOrder::NewestFirst {
            result.reverse();
        }
        if let Some(limit) = limit {
            result.truncate(limit);
        }
        Ok(result)
    }

    fn update_status(
        &self,
        item_id: &ItemId,
        version: u32,
        verdict: ReviewVerdict,
        reviewer: Option<String>,
        comment: Option<String>,
    ) -> Result<Item, ItemStoreError> {
        let mut items = self
            .items
            .write()
            .map_err(|_| ItemStoreError::Storage("lock poisoned".to_string()))?;

        let item = items
            .get_mut(&ItemKey::new(item_id.clone(), version))
            .ok_or_else(|| ItemStoreError::NotFound {
                item_id: item_id.clone(),
                version,
            })?;

        item.apply_review(verdict, reviewer, comment, Utc::now());
        Ok(item.clone())
    }

    fn scan_all(&self) -> Result<Vec<Item>, ItemStoreError> {
        let items = self
            .items
            .read()
            .map_err(|_| ItemStoreError::Storage("lock poisoned".to_string()))?;

        let mut result: Vec<_> = items.values().cloned().collect();
        result.sort_by(|a, b| {
            (a.created_at, a.item_id.as_str()).cmp(&(b.created_at, b.item_id.as_str()))
        });
        Ok(result)
    }
}
