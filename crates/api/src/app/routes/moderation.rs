use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use playforge_core::ItemStatus;
use playforge_infra::{ItemStore as _, QueryOrder, ReviewRequest};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

/// `GET /pending` — the moderation queue, oldest first.
pub async fn pending(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = match services
        .items
        .query_by_status(ItemStatus::Pending, None, QueryOrder::OldestFirst)
    {
        Ok(items) => items,
        Err(e) => return errors::store_error_to_response(e),
    };

    Json(serde_json::json!({ "items": items })).into_response()
}

/// `POST /review` — apply a moderation decision.
pub async fn review(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ReviewBody>,
) -> axum::response::Response {
    let outcome = match services.reviewer.review(ReviewRequest {
        item_id: body.item_id,
        version: body.version,
        status: body.status,
        reviewer: body.reviewer,
        comment: body.comment,
    }) {
        Ok(outcome) => outcome,
        Err(e) => return errors::review_error_to_response(e),
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "ok": true,
            "itemId": outcome.item_id.to_string(),
            "status": outcome.status.as_str(),
        })),
    )
        .into_response()
}
