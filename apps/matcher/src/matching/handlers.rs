//! Axum route handlers for the Matching API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::extract_text;
use crate::errors::AppError;
use crate::matching::listing::JobListing;
use crate::matching::models::{JobPosting, MatchResult};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchTextRequest {
    pub resume_text: String,
    /// Validated record by record so errors can name the offending job.
    pub jobs: Value,
}

#[derive(Debug, Deserialize)]
pub struct MatchListingsRequest {
    pub resume_text: String,
    pub listings: Vec<JobListing>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub status: &'static str,
    pub matches: Vec<MatchResult>,
}

impl MatchResponse {
    fn success(matches: Vec<MatchResult>) -> Self {
        Self {
            status: "success",
            matches,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /match
///
/// Multipart form: `resume` (a .pdf or .txt file) and `jobs` (JSON array string).
/// The jobs payload is validated before the document is parsed.
pub async fn handle_match_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MatchResponse>, AppError> {
    let mut resume: Option<(String, Vec<u8>)> = None;
    let mut jobs_raw: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.body_text()))?;
                resume = Some((file_name, bytes.to_vec()));
            }
            Some("jobs") => {
                jobs_raw = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(e.body_text()))?,
                );
            }
            _ => {}
        }
    }

    let jobs_raw =
        jobs_raw.ok_or_else(|| AppError::Validation("Missing form field 'jobs'".to_string()))?;
    let jobs = JobPosting::from_json_str(&jobs_raw)?;

    let (file_name, bytes) =
        resume.ok_or_else(|| AppError::Validation("Resume file is required".to_string()))?;
    let resume_text = extract_text(&file_name, bytes).await?;

    let matches = state.engine.rank_jobs(&resume_text, &jobs).await?;
    Ok(Json(MatchResponse::success(matches)))
}

/// POST /api/v1/match
///
/// Same ranking as `/match` for callers that already hold the resume as text.
pub async fn handle_match_text(
    State(state): State<AppState>,
    Json(request): Json<MatchTextRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let jobs = JobPosting::from_payload(request.jobs)?;
    let resume_text = require_resume_text(&request.resume_text)?;

    let matches = state.engine.rank_jobs(resume_text, &jobs).await?;
    Ok(Json(MatchResponse::success(matches)))
}

/// POST /api/v1/match/listings
///
/// Ranks structured listings; each is flattened to composite text first.
pub async fn handle_match_listings(
    State(state): State<AppState>,
    Json(request): Json<MatchListingsRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let resume_text = require_resume_text(&request.resume_text)?;
    let jobs: Vec<JobPosting> = request.listings.into_iter().map(JobPosting::from).collect();

    let matches = state.engine.rank_jobs(resume_text, &jobs).await?;
    Ok(Json(MatchResponse::success(matches)))
}

fn require_resume_text(text: &str) -> Result<&str, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }
    Ok(text)
}
