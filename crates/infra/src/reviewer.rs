//! Moderation decisions.

use std::sync::Arc;

use playforge_core::{ItemId, ItemStatus, ReviewVerdict};

use crate::item_store::{ItemStore, ItemStoreError};

/// A moderation request, still in wire terms (unparsed id/status).
#[derive(Debug, Clone)]
pub struct ReviewRequest {
    pub item_id: String,
    pub version: i64,
    pub status: String,
    pub reviewer: Option<String>,
    pub comment: Option<String>,
}

/// Successful review result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub item_id: ItemId,
    pub status: ItemStatus,
}

/// Review failure.
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    /// Malformed request; never retried.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("item not found")]
    NotFound,

    #[error("store error: {0}")]
    Store(String),
}

/// Applies PENDING→APPROVED / PENDING→REJECTED transitions.
///
/// The two outcomes are terminal by convention; the store does not verify
/// that the row was still PENDING, so a repeated review overwrites.
pub struct Reviewer {
    items: Arc<dyn ItemStore>,
}

impl Reviewer {
    pub fn new(items: Arc<dyn ItemStore>) -> Self {
        Self { items }
    }

    pub fn review(&self, request: ReviewRequest) -> Result<ReviewOutcome, ReviewError> {
        if request.item_id.trim().is_empty() {
            return Err(ReviewError::Validation("itemId must not be empty".to_string()));
        }
        let item_id: ItemId = request
            .item_id
            .parse()
            .map_err(|_| ReviewError::Validation(format!("malformed itemId: {:?}", request.item_id)))?;

        if request.version < 1 {
            return Err(ReviewError::Validation("version must be positive".to_string()));
        }
        let version = u32::try_from(request.version)
            .map_err(|_| ReviewError::Validation("version out of range".to_string()))?;

        let verdict = ReviewVerdict::parse(&request.status).ok_or_else(|| {
            ReviewError::Validation(format!(
                "status must be APPROVED or REJECTED, got {:?}",
                request.status
            ))
        })?;

        let updated = self
            .items
            .update_status(&item_id, version, verdict, request.reviewer, request.comment)
            .map_err(|e| match e {
                ItemStoreError::NotFound { .. } => ReviewError::NotFound,
                ItemStoreError::Storage(msg) => ReviewError::Store(msg),
            })?;

        Ok(ReviewOutcome {
            item_id: updated.item_id,
            status: updated.status,
        })
    }
}
