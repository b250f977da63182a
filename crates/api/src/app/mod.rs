//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: infrastructure wiring (stores, generators, orchestrator)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, routing::post, Extension, Router};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// The surface is CORS-open on purpose: bearer-token verification happens
/// upstream at the gateway, and the player/moderation UIs are served from a
/// different origin.
pub fn build_app(services: Arc<AppServices>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .route("/request-items", post(routes::generation::request_items))
        .route("/pending", get(routes::moderation::pending))
        .route("/review", post(routes::moderation::review))
        .route("/item-stats", get(routes::serving::item_stats))
        .route("/random-approved", get(routes::serving::random_approved))
        .route(
            "/prompt-config",
            get(routes::prompt_config::get_prompt).post(routes::prompt_config::set_prompt),
        )
        .layer(
            ServiceBuilder::new()
                .layer(Extension(services))
                .layer(CorsLayer::permissive()),
        )
}
