mod config;
mod document;
mod embedding;
mod errors;
mod matching;
mod nlp;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::{Config, EmbeddingBackend};
use crate::embedding::{Embedder, HashEmbedder, HttpEmbedder};
use crate::matching::ranking::RankingEngine;
use crate::nlp::LexiconTagger;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting matcher v{}", env!("CARGO_PKG_VERSION"));

    // Embedding and tagging capabilities are built once and shared by every request.
    let embedder = build_embedder(&config)?;
    info!(
        "Embedder initialized (backend: {}, dimension: {})",
        embedder.name(),
        embedder.dimension()
    );

    let tagger = Arc::new(LexiconTagger::new());
    info!("Tagger initialized (lexicon)");

    let engine = Arc::new(RankingEngine::new(embedder, tagger));

    // Build app state
    let state = AppState {
        config: config.clone(),
        engine,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the web backend once it has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs the configured embedding backend.
fn build_embedder(config: &Config) -> Result<Arc<dyn Embedder>> {
    match config.embedding_backend {
        EmbeddingBackend::Hash => Ok(Arc::new(HashEmbedder::new(config.embedding_dimension))),
        EmbeddingBackend::Http => {
            let url = config
                .embedding_url
                .clone()
                .context("EMBEDDING_URL is required for the http embedding backend")?;
            let embedder = HttpEmbedder::new(
                url,
                config.embedding_model.clone(),
                config.embedding_api_key.clone(),
                config.embedding_dimension,
                config.embedding_batch_size,
            )
            .context("Failed to build embedding HTTP client")?;
            info!("Embedding model: {}", embedder.model());
            Ok(Arc::new(embedder))
        }
    }
}
