//! Ranking Engine — scores every job against one resume and orders the results.
//!
//! Per call, the resume is embedded and keyword-extracted exactly once; every
//! job then reads those two values and nothing else shared. Job descriptions
//! are embedded through one `embed_batch` call, so a backend that batches pays
//! one round trip per chunk instead of one per job.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};
use uuid::Uuid;

use crate::embedding::{Embedder, EmbeddingError, EmbeddingVector};
use crate::errors::AppError;
use crate::matching::keywords::{KeywordExtractor, KeywordSet};
use crate::matching::models::{JobPosting, MatchResult};
use crate::matching::scoring::{
    calibrate, overlap_score, semantic_score, weighted_score, ScoringWeights,
};
use crate::nlp::Tagger;

/// Resume-side signals, computed once per ranking call.
#[derive(Debug, Clone)]
pub struct ResumeProfile {
    pub keywords: KeywordSet,
    pub vector: EmbeddingVector,
}

/// Carried in `AppState` behind an `Arc`; the embedder and tagger inside are
/// shared read-only across concurrent requests.
pub struct RankingEngine {
    embedder: Arc<dyn Embedder>,
    extractor: KeywordExtractor,
    weights: ScoringWeights,
}

impl RankingEngine {
    pub fn new(embedder: Arc<dyn Embedder>, tagger: Arc<dyn Tagger>) -> Self {
        Self {
            embedder,
            extractor: KeywordExtractor::new(tagger),
            weights: ScoringWeights::default(),
        }
    }

    pub fn embedder(&self) -> &dyn Embedder {
        self.embedder.as_ref()
    }

    pub fn extractor(&self) -> &KeywordExtractor {
        &self.extractor
    }

    /// Ranks `jobs` by fit to `resume_text`, best first. Equal scores keep input order.
    ///
    /// Any embedding or tagging failure fails the whole call; no partial results.
    pub async fn rank_jobs(
        &self,
        resume_text: &str,
        jobs: &[JobPosting],
    ) -> Result<Vec<MatchResult>, AppError> {
        let started = Instant::now();
        let run_id = Uuid::new_v4();

        let resume = self.profile_resume(resume_text).await?;

        let descriptions: Vec<&str> = jobs.iter().map(|j| j.description.as_str()).collect();
        let job_vectors = if descriptions.is_empty() {
            Vec::new()
        } else {
            self.embedder.embed_batch(&descriptions).await?
        };

        if job_vectors.len() != jobs.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: jobs.len(),
                got: job_vectors.len(),
            }
            .into());
        }

        let mut results = Vec::with_capacity(jobs.len());
        for (job, job_vector) in jobs.iter().zip(&job_vectors) {
            let job_keywords = self.extractor.extract(&job.description)?;
            let result = self.score_job(&resume, job, job_vector, job_keywords)?;
            debug!(%run_id, job_id = %result.job_id, score = result.score, "scored job");
            results.push(result);
        }

        sort_by_score(&mut results);

        info!(
            %run_id,
            jobs = jobs.len(),
            resume_keywords = resume.keywords.len(),
            top_score = results.first().map(|r| r.score),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "ranked jobs"
        );

        Ok(results)
    }

    /// Extracts keywords and the embedding for the resume.
    pub async fn profile_resume(&self, resume_text: &str) -> Result<ResumeProfile, AppError> {
        let keywords = self.extractor.extract(resume_text)?;
        let vector = self.embedder.embed(resume_text).await?;
        Ok(ResumeProfile { keywords, vector })
    }

    /// Scores one job against a precomputed resume profile.
    pub fn score_job(
        &self,
        resume: &ResumeProfile,
        job: &JobPosting,
        job_vector: &EmbeddingVector,
        job_keywords: KeywordSet,
    ) -> Result<MatchResult, EmbeddingError> {
        if job_vector.dimension() != resume.vector.dimension() {
            return Err(EmbeddingError::DimensionMismatch {
                expected: resume.vector.dimension(),
                got: job_vector.dimension(),
            });
        }

        let semantic = semantic_score(&resume.vector, job_vector);
        if !semantic.is_finite() {
            return Err(EmbeddingError::NonFinite);
        }

        let overlap = overlap_score(&resume.keywords, &job_keywords) * 100.0;
        let score = calibrate(weighted_score(semantic, overlap, &self.weights), &self.weights);

        let (matching_skills, missing_skills) = job_keywords
            .into_iter()
            .partition(|keyword| resume.keywords.contains(keyword));

        Ok(MatchResult {
            job_id: job.id.clone(),
            job_title: job.title.clone(),
            score,
            matching_skills,
            missing_skills,
        })
    }
}

/// Stable descending sort: ties keep their input order.
fn sort_by_score(results: &mut [MatchResult]) {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use proptest::prelude::*;

    use crate::embedding::HashEmbedder;
    use crate::matching::models::JobId;
    use crate::nlp::LexiconTagger;

    /// Hash embedder that counts how many texts it has embedded.
    struct CountingEmbedder {
        inner: HashEmbedder,
        texts_embedded: AtomicUsize,
        single_calls: AtomicUsize,
    }

    impl CountingEmbedder {
        fn new() -> Self {
            Self {
                inner: HashEmbedder::new(128),
                texts_embedded: AtomicUsize::new(0),
                single_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Embedder for CountingEmbedder {
        async fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbeddingError> {
            self.single_calls.fetch_add(1, Ordering::SeqCst);
            self.texts_embedded.fetch_add(1, Ordering::SeqCst);
            self.inner.embed(text).await
        }

        async fn embed_batch(
            &self,
            texts: &[&str],
        ) -> Result<Vec<EmbeddingVector>, EmbeddingError> {
            self.texts_embedded.fetch_add(texts.len(), Ordering::SeqCst);
            Ok(texts.iter().map(|t| self.inner.embed_sync(t)).collect())
        }

        fn dimension(&self) -> usize {
            self.inner.dimension()
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    /// Returns fixed vectors: resume → `resume`, every job → `job`.
    struct FixedEmbedder {
        resume: Vec<f32>,
        job: Vec<f32>,
    }

    #[async_trait]
    impl Embedder for FixedEmbedder {
        async fn embed(&self, _text: &str) -> Result<EmbeddingVector, EmbeddingError> {
            Ok(EmbeddingVector::new(self.resume.clone()))
        }

        async fn embed_batch(
            &self,
            texts: &[&str],
        ) -> Result<Vec<EmbeddingVector>, EmbeddingError> {
            Ok(texts
                .iter()
                .map(|_| EmbeddingVector::new(self.job.clone()))
                .collect())
        }

        fn dimension(&self) -> usize {
            self.resume.len()
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct BrokenEmbedder;

    #[async_trait]
    impl Embedder for BrokenEmbedder {
        async fn embed(&self, _text: &str) -> Result<EmbeddingVector, EmbeddingError> {
            Err(EmbeddingError::RetriesExhausted { retries: 3 })
        }

        fn dimension(&self) -> usize {
            384
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    fn engine_with(embedder: Arc<dyn Embedder>) -> RankingEngine {
        RankingEngine::new(embedder, Arc::new(LexiconTagger::new()))
    }

    fn hash_engine() -> RankingEngine {
        engine_with(Arc::new(HashEmbedder::default()))
    }

    const RESUME: &str = "Experienced Python developer with AWS and Docker skills";

    #[tokio::test]
    async fn test_python_docker_scenario() {
        let jobs = vec![JobPosting::new(
            1,
            "Backend Engineer",
            "Looking for a Python developer with Docker experience",
        )];

        let results = hash_engine().rank_jobs(RESUME, &jobs).await.unwrap();

        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.job_id, JobId::from(1));
        assert_eq!(result.job_title, "Backend Engineer");
        assert!(result.matching_skills.contains("python"));
        assert!(result.matching_skills.contains("docker"));
        assert!(result.missing_skills.contains("experience"));
        assert!(!result.missing_skills.contains("python"));
        assert!(!result.missing_skills.contains("docker"));
    }

    #[tokio::test]
    async fn test_empty_job_list_returns_empty() {
        let results = hash_engine().rank_jobs(RESUME, &[]).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_resume_embedded_once_regardless_of_job_count() {
        let embedder = Arc::new(CountingEmbedder::new());
        let engine = engine_with(embedder.clone());
        let jobs: Vec<JobPosting> = (0..5)
            .map(|i| JobPosting::new(i, "", "Rust engineer with Kafka"))
            .collect();

        engine.rank_jobs(RESUME, &jobs).await.unwrap();

        assert_eq!(embedder.single_calls.load(Ordering::SeqCst), 1);
        assert_eq!(embedder.texts_embedded.load(Ordering::SeqCst), 1 + jobs.len());
    }

    #[tokio::test]
    async fn test_identical_descriptions_score_identically() {
        let jobs = vec![
            JobPosting::new(1, "A", "Senior Rust engineer, Kubernetes and Postgres"),
            JobPosting::new(2, "B", "Senior Rust engineer, Kubernetes and Postgres"),
        ];

        let results = hash_engine().rank_jobs(RESUME, &jobs).await.unwrap();

        assert_eq!(results[0].score, results[1].score);
        assert_eq!(results[0].matching_skills, results[1].matching_skills);
        assert_eq!(results[0].missing_skills, results[1].missing_skills);
    }

    #[tokio::test]
    async fn test_ties_keep_input_order() {
        let jobs = vec![
            JobPosting::new("c", "", "Python developer"),
            JobPosting::new("a", "", "Python developer"),
            JobPosting::new("b", "", "Python developer"),
        ];

        let results = hash_engine().rank_jobs(RESUME, &jobs).await.unwrap();
        let ids: Vec<String> = results.iter().map(|r| r.job_id.to_string()).collect();

        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_better_fit_ranks_first() {
        let jobs = vec![
            JobPosting::new(1, "Nurse", "Registered nurse for hospital ward shifts"),
            JobPosting::new(2, "Backend", "Python developer with Docker and AWS"),
        ];

        let results = hash_engine().rank_jobs(RESUME, &jobs).await.unwrap();

        assert_eq!(results[0].job_id, JobId::from(2));
        assert!(results[0].score >= results[1].score);
    }

    #[tokio::test]
    async fn test_job_without_keywords_scores_on_semantics_only() {
        // cos = 0.6 → semantic 60 → round(0.7 * 60) = 42 → +15 = 57
        let engine = engine_with(Arc::new(FixedEmbedder {
            resume: vec![1.0, 0.0],
            job: vec![0.6, 0.8],
        }));
        let jobs = vec![JobPosting::new(1, "", "the and of")];

        let results = engine.rank_jobs(RESUME, &jobs).await.unwrap();

        assert!((results[0].score - 57.0).abs() < 1e-9);
        assert!(results[0].matching_skills.is_empty());
        assert!(results[0].missing_skills.is_empty());
    }

    #[tokio::test]
    async fn test_negative_similarity_clamps_to_zero() {
        let engine = engine_with(Arc::new(FixedEmbedder {
            resume: vec![1.0, 0.0],
            job: vec![-1.0, 0.0],
        }));
        let jobs = vec![JobPosting::new(1, "", "Welding and carpentry")];

        let results = engine.rank_jobs(RESUME, &jobs).await.unwrap();

        assert_eq!(results[0].score, 0.0);
    }

    #[tokio::test]
    async fn test_perfect_match_clamps_to_hundred() {
        let engine = engine_with(Arc::new(FixedEmbedder {
            resume: vec![1.0, 0.0],
            job: vec![1.0, 0.0],
        }));
        let jobs = vec![JobPosting::new(1, "", "Python developer")];

        let results = engine.rank_jobs(RESUME, &jobs).await.unwrap();

        // 0.7 * 100 + 0.3 * 100 + 15 = 115 → 100
        assert_eq!(results[0].score, 100.0);
    }

    #[tokio::test]
    async fn test_dimension_mismatch_fails_call() {
        let engine = engine_with(Arc::new(FixedEmbedder {
            resume: vec![1.0, 0.0],
            job: vec![1.0, 0.0, 0.0],
        }));
        let jobs = vec![JobPosting::new(1, "", "Python developer")];

        let err = engine.rank_jobs(RESUME, &jobs).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Embedding(EmbeddingError::DimensionMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_embedder_failure_is_fatal_not_zero_score() {
        let engine = engine_with(Arc::new(BrokenEmbedder));
        let jobs = vec![JobPosting::new(1, "", "Python developer")];

        let err = engine.rank_jobs(RESUME, &jobs).await.unwrap_err();
        assert!(matches!(err, AppError::Embedding(_)));
    }

    #[tokio::test]
    async fn test_ranking_is_idempotent() {
        let engine = hash_engine();
        let jobs = vec![
            JobPosting::new(1, "", "Go and Kubernetes platform engineer"),
            JobPosting::new(2, "", "Python developer with Docker"),
            JobPosting::new(3, "", "AWS cloud architect"),
        ];

        let first = engine.rank_jobs(RESUME, &jobs).await.unwrap();
        let second = engine.rank_jobs(RESUME, &jobs).await.unwrap();

        assert_eq!(first, second);
    }

    fn description_strategy() -> impl Strategy<Value = String> {
        proptest::collection::vec(
            proptest::sample::select(vec![
                "python", "docker", "rust", "kafka", "the", "with", "developer", "engineer",
                "looking", "experience", "aws", "and", "senior", "postgres", "for",
            ]),
            0..12,
        )
        .prop_map(|words| words.join(" "))
    }

    proptest! {
        #[test]
        fn prop_results_bounded_ordered_and_partitioned(
            resume in description_strategy(),
            descriptions in proptest::collection::vec(description_strategy(), 0..6),
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let engine = hash_engine();
            let jobs: Vec<JobPosting> = descriptions
                .iter()
                .enumerate()
                .map(|(i, d)| JobPosting::new(i as i64, "", d))
                .collect();

            let results = runtime.block_on(engine.rank_jobs(&resume, &jobs)).unwrap();
            prop_assert_eq!(results.len(), jobs.len());

            for pair in results.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
            }

            for result in &results {
                prop_assert!((0.0..=100.0).contains(&result.score));
                prop_assert!(result.matching_skills.is_disjoint(&result.missing_skills));

                let JobId::Number(id) = &result.job_id else { unreachable!() };
                let index = id.as_u64().unwrap() as usize;
                let job_keywords = engine
                    .extractor()
                    .extract(&jobs[index].description)
                    .unwrap();
                let union: BTreeSet<String> = result
                    .matching_skills
                    .union(&result.missing_skills)
                    .cloned()
                    .collect();
                prop_assert_eq!(union, job_keywords);
            }
        }
    }
}
