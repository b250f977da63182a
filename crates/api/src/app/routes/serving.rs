use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use playforge_infra::ServeError;

use crate::app::errors;
use crate::app::services::AppServices;

/// `GET /item-stats` — full-scan dashboard counts.
pub async fn item_stats(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.stats.compute_stats() {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// `GET /random-approved` — a uniform pick from the recent approved window.
pub async fn random_approved(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.random.serve_random() {
        Ok(item) => Json(item).into_response(),
        Err(ServeError::NotFound) => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "no approved items available",
        ),
        Err(ServeError::Store(e)) => errors::store_error_to_response(e),
    }
}
