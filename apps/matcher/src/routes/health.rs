use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status plus the embedding and tagging backends in use.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let embedder = state.engine.embedder();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "matcher",
        "embedder": embedder.name(),
        "dimension": embedder.dimension(),
        "tagger": state.engine.extractor().tagger_name(),
    }))
}
