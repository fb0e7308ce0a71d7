use anyhow::{bail, Context, Result};

/// Which embedding capability the service is wired to at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbeddingBackend {
    /// OpenAI-compatible `/v1/embeddings` endpoint at `EMBEDDING_URL`.
    Http,
    /// Offline feature-hashing embedder. Deterministic, no model download.
    Hash,
}

/// Application configuration loaded from environment variables.
/// Fails at startup if a required variable is missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub embedding_backend: EmbeddingBackend,
    pub embedding_url: Option<String>,
    pub embedding_model: String,
    pub embedding_api_key: Option<String>,
    pub embedding_dimension: usize,
    pub embedding_batch_size: usize,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let embedding_backend = match optional_env("EMBEDDING_BACKEND").as_deref() {
            None | Some("http") => EmbeddingBackend::Http,
            Some("hash") => EmbeddingBackend::Hash,
            Some(other) => bail!("EMBEDDING_BACKEND must be 'http' or 'hash', got '{other}'"),
        };

        let embedding_url = match embedding_backend {
            EmbeddingBackend::Http => Some(require_env("EMBEDDING_URL")?),
            EmbeddingBackend::Hash => optional_env("EMBEDDING_URL"),
        };

        Ok(Config {
            port: parse_env("PORT", 8000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            embedding_backend,
            embedding_url,
            embedding_model: optional_env("EMBEDDING_MODEL")
                .unwrap_or_else(|| "all-MiniLM-L6-v2".to_string()),
            embedding_api_key: optional_env("EMBEDDING_API_KEY"),
            embedding_dimension: parse_env("EMBEDDING_DIMENSION", 384)?,
            embedding_batch_size: parse_env("EMBEDDING_BATCH_SIZE", 32)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| anyhow::anyhow!("invalid value '{raw}'"))
            .with_context(|| format!("{key} must be a positive integer")),
        None => Ok(default),
    }
}
