// Job recommendations for the dashboard.
// Implements: weighted scoring (scoring), fetch + rank + recency fallback (engine).
// The engine reads through `Repository` trait objects only.

pub mod engine;
pub mod handlers;
pub mod scoring;

use serde::Serialize;
use thiserror::Error;

use crate::models::job::Job;
use crate::store::StoreError;

pub use engine::Recommender;

/// A job annotated with its relevance to one user. Computed per call, never
/// stored. `recommendation_score` is `None` for unscored fallback entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredJob {
    #[serde(flatten)]
    pub job: Job,
    pub recommendation_score: Option<f64>,
}

impl ScoredJob {
    pub fn scored(job: Job, score: f64) -> Self {
        Self {
            job,
            recommendation_score: Some(score),
        }
    }

    pub fn unscored(job: Job) -> Self {
        Self {
            job,
            recommendation_score: None,
        }
    }
}

/// Failures inside a recommendation pass. Never returned to callers of
/// `Recommender::recommend`; they trigger the recency fallback instead.
#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("job {job_id} scored {score}, outside 0-100")]
    InvalidScore { job_id: String, score: f64 },
}
