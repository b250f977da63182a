use serde::Deserialize;

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /request-items`.
///
/// `type` is taken as a raw string and parsed in the handler so an unknown
/// value yields a consistent 400 payload instead of a body-rejection.
#[derive(Debug, Deserialize)]
pub struct RequestItemsBody {
    pub count: i64,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub lang: Option<String>,
}

/// Body of `POST /review`.
#[derive(Debug, Deserialize)]
pub struct ReviewBody {
    #[serde(rename = "itemId")]
    pub item_id: String,
    pub version: i64,
    pub status: String,
    pub reviewer: Option<String>,
    pub comment: Option<String>,
}

/// Body of `POST /prompt-config`.
#[derive(Debug, Deserialize)]
pub struct PromptConfigBody {
    pub prompt: String,
}
