//! Scoring primitives: semantic similarity, skill overlap, weighted blend and calibration.

use crate::embedding::{cosine_similarity, EmbeddingVector};
use crate::matching::keywords::KeywordSet;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// Blend weights and the UX calibration offset.
///
/// The offset is added after the weighted blend is rounded and before the
/// result is clamped to `[MIN_SCORE, MAX_SCORE]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub semantic: f64,
    pub overlap: f64,
    pub calibration_offset: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            semantic: 0.7,
            overlap: 0.3,
            calibration_offset: 15.0,
        }
    }
}

/// Cosine similarity scaled to a percentage. Not clamped: nominally `[-100, 100]`.
pub fn semantic_score(a: &EmbeddingVector, b: &EmbeddingVector) -> f64 {
    cosine_similarity(a.as_slice(), b.as_slice()) * 100.0
}

/// Fraction of job keywords present in the resume, `[0, 1]`. Zero when the job has none.
pub fn overlap_score(resume_keywords: &KeywordSet, job_keywords: &KeywordSet) -> f64 {
    if job_keywords.is_empty() {
        return 0.0;
    }
    let shared = job_keywords.intersection(resume_keywords).count();
    shared as f64 / job_keywords.len() as f64
}

/// `round(w_s * semantic + w_o * overlap_pct, 2)`; `overlap_pct` is already on the 0–100 scale.
pub fn weighted_score(semantic: f64, overlap_pct: f64, weights: &ScoringWeights) -> f64 {
    round_to_hundredths(weights.semantic * semantic + weights.overlap * overlap_pct)
}

/// Adds the calibration offset, then clamps to `[0, 100]`.
pub fn calibrate(raw_score: f64, weights: &ScoringWeights) -> f64 {
    (raw_score + weights.calibration_offset).clamp(MIN_SCORE, MAX_SCORE)
}

/// Rounds half away from zero at 2 decimal places.
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
