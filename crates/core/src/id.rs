//! Identifiers used across the domain.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Prefix carried by every item identifier.
const ITEM_ID_PREFIX: &str = "item_";

/// Number of hex characters following the prefix.
const ITEM_ID_HEX_LEN: usize = 8;

/// Identifier of a content item.
///
/// Canonical form is `item_` followed by 8 lowercase hex characters, derived
/// from a fresh random UUID with separators stripped. Identity is assigned
/// once at generation time; together with `version` it uniquely keys a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Mint a fresh identifier from a random UUID.
    ///
    /// Collisions over 8 hex chars are possible in principle but not expected
    /// at this system's volumes; the store does not guard against them.
    pub fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self(format!("{ITEM_ID_PREFIX}{}", &hex[..ITEM_ID_HEX_LEN]))
    }

    /// Derive the identifier a given UUID would produce.
    ///
    /// Prefer passing IDs explicitly in tests for determinism.
    pub fn from_uuid(uuid: Uuid) -> Self {
        let hex = uuid.simple().to_string();
        Self(format!("{ITEM_ID_PREFIX}{}", &hex[..ITEM_ID_HEX_LEN]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ItemId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix(ITEM_ID_PREFIX)
            .ok_or_else(|| DomainError::invalid_id(format!("ItemId: missing 'item_' prefix: {s:?}")))?;

        if hex.len() != ITEM_ID_HEX_LEN {
            return Err(DomainError::invalid_id(format!(
                "ItemId: expected {ITEM_ID_HEX_LEN} hex chars, got {}",
                hex.len()
            )));
        }

        if !hex.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)) {
            return Err(DomainError::invalid_id(format!(
                "ItemId: non-hex characters in {s:?}"
            )));
        }

        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for ItemId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ItemId> for String {
    fn from(value: ItemId) -> Self {
        value.0
    }
}

/// Identifier of a generation batch (the opaque fan-out handle).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(Uuid);

impl BatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for BatchId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "batch_{}", self.0.simple())
    }
}
