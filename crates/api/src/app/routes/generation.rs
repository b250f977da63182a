use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use playforge_core::ContentType;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

/// Largest accepted fan-out per request.
const MAX_BATCH_SIZE: i64 = 100;

/// `POST /request-items` — trigger an async generation batch.
///
/// Returns as soon as the batch is dispatched; completion is observable only
/// through `/pending`. The `executionArn` field carries the opaque batch
/// handle (name kept for compatibility with the existing moderation UI).
pub async fn request_items(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RequestItemsBody>,
) -> axum::response::Response {
    if body.count < 1 || body.count > MAX_BATCH_SIZE {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_count",
            format!("count must be between 1 and {MAX_BATCH_SIZE}"),
        );
    }

    let content_type = match body.content_type.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<ContentType>() {
            Ok(ct) => Some(ct),
            Err(_) => {
                return errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_type",
                    format!("unknown content type: {raw:?}"),
                );
            }
        },
    };

    let handle = services
        .orchestrator
        .request_batch(body.count as usize, content_type, body.lang);

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "ok": true,
            "executionArn": handle.batch_id.to_string(),
        })),
    )
        .into_response()
}
