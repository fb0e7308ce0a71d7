pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Multipart upload contract consumed by the web backend
        .route("/match", post(handlers::handle_match_upload))
        // JSON API
        .route("/api/v1/match", post(handlers::handle_match_text))
        .route(
            "/api/v1/match/listings",
            post(handlers::handle_match_listings),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
