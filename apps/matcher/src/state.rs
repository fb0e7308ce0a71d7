use std::sync::Arc;

use crate::config::Config;
use crate::matching::ranking::RankingEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Ranking engine holding the process-wide embedder and tagger.
    pub engine: Arc<RankingEngine>,
}
