//! `playforge-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure
//! concerns): item identity, the content item model with its review
//! lifecycle, and the domain error taxonomy.

pub mod error;
pub mod id;
pub mod item;

pub use error::{DomainError, DomainResult};
pub use id::{BatchId, ItemId};
pub use item::{ContentType, Item, ItemStatus, ReviewVerdict};
