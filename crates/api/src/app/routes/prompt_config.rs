use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use playforge_infra::{PromptConfigStore as _, PromptStoreError};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

/// `GET /prompt-config` — the configured template (empty string if unset).
pub async fn get_prompt(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.prompts.get() {
        Ok(prompt) => Json(serde_json::json!({ "prompt": prompt })).into_response(),
        Err(e) => errors::json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            e.to_string(),
        ),
    }
}

/// `POST /prompt-config` — overwrite the template in place.
pub async fn set_prompt(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::PromptConfigBody>,
) -> axum::response::Response {
    match services.prompts.set(&body.prompt) {
        Ok(()) => Json(serde_json::json!({ "ok": true })).into_response(),
        Err(PromptStoreError::EmptyPrompt) => errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "prompt must not be empty",
        ),
        Err(PromptStoreError::Storage(msg)) => {
            errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg)
        }
    }
}
