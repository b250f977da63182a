//! Per-type/per-status item counts.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use playforge_core::{ContentType, ItemStatus};

use crate::item_store::{ItemStore, ItemStoreError};

/// Counts of one content type, keyed the way the dashboard expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    #[serde(rename = "PENDING")]
    pub pending: usize,
    #[serde(rename = "APPROVED")]
    pub approved: usize,
    #[serde(rename = "REJECTED")]
    pub rejected: usize,
    #[serde(rename = "TOTAL")]
    pub total: usize,
}

/// One stats snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ItemStats {
    pub total: usize,
    #[serde(rename = "byType")]
    pub by_type: BTreeMap<ContentType, StatusCounts>,
}

/// Computes dashboard stats via a full scan.
///
/// No caching and no incremental counters: every call recomputes from a
/// point-in-time scan, so concurrent writes during the scan can skew a
/// snapshot slightly.
pub struct StatsAggregator {
    items: Arc<dyn ItemStore>,
}

impl StatsAggregator {
    pub fn new(items: Arc<dyn ItemStore>) -> Self {
        Self { items }
    }

    pub fn compute_stats(&self) -> Result<ItemStats, ItemStoreError> {
        let all = self.items.scan_all()?;

        // Every known type appears, zeroed, so the dashboard shape is stable.
        let mut by_type: BTreeMap<ContentType, StatusCounts> = ContentType::ALL
            .iter()
            .map(|ct| (*ct, StatusCounts::default()))
            .collect();

        for item in &all {
            let counts = by_type.entry(item.content_type).or_default();
            match item.status {
                ItemStatus::Pending => counts.pending += 1,
                ItemStatus::Approved => counts.approved += 1,
                ItemStatus::Rejected => counts.rejected += 1,
            }
            counts.total += 1;
        }

        Ok(ItemStats {
            total: all.len(),
            by_type,
        })
    }
}
