use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use playforge_infra::{ItemStoreError, ReviewError};

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn store_error_to_response(err: ItemStoreError) -> axum::response::Response {
    match err {
        ItemStoreError::NotFound { .. } => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        ItemStoreError::Storage(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg)
        }
    }
}

pub fn review_error_to_response(err: ReviewError) -> axum::response::Response {
    match err {
        ReviewError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        ReviewError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "item not found"),
        ReviewError::Store(msg) => json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg),
    }
}
