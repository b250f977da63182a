//! The content item model and its review lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::id::ItemId;

/// Kind of interactive content an item carries.
///
/// The `spec` payload shape depends on this value; the core treats `spec` as
/// opaque JSON and only the player/UI interprets it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    WordSearch,
    QuizMcq,
    MemoryMatch,
    SpaceShooter,
    Jigsaw,
    TrueFalse,
    OddOneOut,
}

impl ContentType {
    /// All known content types, in a stable order (stats output relies on it).
    pub const ALL: [ContentType; 7] = [
        ContentType::WordSearch,
        ContentType::QuizMcq,
        ContentType::MemoryMatch,
        ContentType::SpaceShooter,
        ContentType::Jigsaw,
        ContentType::TrueFalse,
        ContentType::OddOneOut,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::WordSearch => "word_search",
            ContentType::QuizMcq => "quiz_mcq",
            ContentType::MemoryMatch => "memory_match",
            ContentType::SpaceShooter => "space_shooter",
            ContentType::Jigsaw => "jigsaw",
            ContentType::TrueFalse => "true_false",
            ContentType::OddOneOut => "odd_one_out",
        }
    }
}

impl core::fmt::Display for ContentType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for ContentType {
    type Err = crate::error::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentType::ALL
            .into_iter()
            .find(|ct| ct.as_str() == s)
            .ok_or_else(|| crate::error::DomainError::validation(format!("unknown content type: {s:?}")))
    }
}

/// Moderation status of an item.
///
/// Lifecycle: PENDING at creation; PENDING→APPROVED / PENDING→REJECTED via
/// review. APPROVED and REJECTED are terminal by convention — the store does
/// not structurally prevent a second transition.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    Pending,
    Approved,
    Rejected,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "PENDING",
            ItemStatus::Approved => "APPROVED",
            ItemStatus::Rejected => "REJECTED",
        }
    }
}

impl core::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a moderation decision.
///
/// Review may only land on APPROVED or REJECTED; typing the verdict keeps
/// PENDING (or anything else) out of the transition entirely.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewVerdict {
    Approved,
    Rejected,
}

impl ReviewVerdict {
    /// Parse a wire-format status, rejecting everything outside the two
    /// allowed targets.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "APPROVED" => Some(ReviewVerdict::Approved),
            "REJECTED" => Some(ReviewVerdict::Rejected),
            _ => None,
        }
    }

    pub fn as_status(&self) -> ItemStatus {
        match self {
            ReviewVerdict::Approved => ItemStatus::Approved,
            ReviewVerdict::Rejected => ItemStatus::Rejected,
        }
    }
}

/// One generated interactive content unit.
///
/// `(item_id, version)` uniquely identifies a row. Created once by the
/// generator (status PENDING), mutated only by review, never deleted.
///
/// Serde attributes produce the documented wire shape:
/// `{id, version, type, lang, status, spec, createdAt, reviewer?,
/// reviewComment?, reviewedAt?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(rename = "id")]
    pub item_id: ItemId,
    pub version: u32,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub lang: String,
    pub status: ItemStatus,
    pub spec: JsonValue,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl Item {
    /// Create a fresh PENDING item with newly assigned identity (version 1).
    pub fn new_pending(content_type: ContentType, lang: impl Into<String>, spec: JsonValue) -> Self {
        Self {
            item_id: ItemId::generate(),
            version: 1,
            content_type,
            lang: lang.into(),
            status: ItemStatus::Pending,
            spec,
            created_at: Utc::now(),
            reviewer: None,
            review_comment: None,
            reviewed_at: None,
        }
    }

    /// Apply a moderation decision in place.
    ///
    /// Missing reviewer/comment fall back to `"unknown"` / `""`. The prior
    /// status is deliberately not inspected (no re-review guard).
    pub fn apply_review(
        &mut self,
        verdict: ReviewVerdict,
        reviewer: Option<String>,
        comment: Option<String>,
        at: DateTime<Utc>,
    ) {
        self.status = verdict.as_status();
        self.reviewer = Some(reviewer.unwrap_or_else(|| "unknown".to_string()));
        self.review_comment = Some(comment.unwrap_or_default());
        self.reviewed_at = Some(at);
    }

    pub fn is_reviewed(&self) -> bool {
        self.reviewed_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn new_pending_assigns_identity_and_status() {
        let item = Item::new_pending(ContentType::QuizMcq, "en", json!({"questions": []}));
        assert_eq!(item.version, 1);
        assert_eq!(item.status, ItemStatus::Pending);
        assert!(item.item_id.as_str().starts_with("item_"));
        assert!(!item.is_reviewed());
    }

    #[test]
    fn wire_shape_uses_documented_field_names() {
        let item = Item::new_pending(ContentType::WordSearch, "en", json!({"grid": []}));
        let wire = serde_json::to_value(&item).unwrap();

        assert!(wire.get("id").is_some());
        assert_eq!(wire["type"], "word_search");
        assert_eq!(wire["status"], "PENDING");
        assert!(wire.get("createdAt").is_some());
        // Review fields stay off the wire until a decision lands.
        assert!(wire.get("reviewer").is_none());
        assert!(wire.get("reviewComment").is_none());
        assert!(wire.get("reviewedAt").is_none());
    }

    #[test]
    fn apply_review_fills_metadata_with_defaults() {
        let mut item = Item::new_pending(ContentType::TrueFalse, "de", json!({"statements": []}));
        let at = Utc::now();
        item.apply_review(ReviewVerdict::Rejected, None, None, at);

        assert_eq!(item.status, ItemStatus::Rejected);
        assert_eq!(item.reviewer.as_deref(), Some("unknown"));
        assert_eq!(item.review_comment.as_deref(), Some(""));
        assert_eq!(item.reviewed_at, Some(at));
    }

    #[test]
    fn apply_review_keeps_explicit_metadata() {
        let mut item = Item::new_pending(ContentType::Jigsaw, "en", json!({"imageUrl": "x"}));
        item.apply_review(
            ReviewVerdict::Approved,
            Some("alice".to_string()),
            Some("looks good".to_string()),
            Utc::now(),
        );

        assert_eq!(item.status, ItemStatus::Approved);
        assert_eq!(item.reviewer.as_deref(), Some("alice"));
        assert_eq!(item.review_comment.as_deref(), Some("looks good"));

        let wire = serde_json::to_value(&item).unwrap();
        assert_eq!(wire["reviewer"], "alice");
        assert_eq!(wire["reviewComment"], "looks good");
    }

    #[test]
    fn verdict_parse_is_restricted() {
        assert_eq!(ReviewVerdict::parse("APPROVED"), Some(ReviewVerdict::Approved));
        assert_eq!(ReviewVerdict::parse("REJECTED"), Some(ReviewVerdict::Rejected));
        assert_eq!(ReviewVerdict::parse("PENDING"), None);
        assert_eq!(ReviewVerdict::parse("approved"), None);
        assert_eq!(ReviewVerdict::parse(""), None);
    }

    #[test]
    fn content_type_round_trips_snake_case() {
        for ct in ContentType::ALL {
            let s = serde_json::to_string(&ct).unwrap();
            assert_eq!(s, format!("\"{}\"", ct.as_str()));
            let back: ContentType = serde_json::from_str(&s).unwrap();
            assert_eq!(back, ct);
        }
    }

    #[test]
    fn content_type_parses_wire_strings() {
        assert_eq!("quiz_mcq".parse::<ContentType>().unwrap(), ContentType::QuizMcq);
        assert!("crossword".parse::<ContentType>().is_err());
        assert!("QUIZ_MCQ".parse::<ContentType>().is_err());
    }
}
