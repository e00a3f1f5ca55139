//! Recommender: fetches a snapshot from the stores and ranks it for one user.
//!
//! `recommend` never fails. Any upstream error or invalid score drops back to
//! the most recently posted jobs, unscored, so the dashboard always has a list.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, warn};

use crate::jobs::search::most_recent;
use crate::models::application::Application;
use crate::models::job::Job;
use crate::models::saved_job::SavedJob;
use crate::models::user::UserProfile;
use crate::recommendation::scoring::{rank_jobs, ScoringWeights};
use crate::recommendation::{RecommendationError, ScoredJob};
use crate::state::Stores;
use crate::store::{Repository, StoreError};

pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 4;

pub struct Recommender {
    users: Arc<dyn Repository<UserProfile>>,
    jobs: Arc<dyn Repository<Job>>,
    saved_jobs: Arc<dyn Repository<SavedJob>>,
    applications: Arc<dyn Repository<Application>>,
    weights: ScoringWeights,
    default_limit: usize,
}

impl Recommender {
    pub fn new(stores: &Stores, default_limit: usize) -> Self {
        Self {
            users: Arc::clone(&stores.users),
            jobs: Arc::clone(&stores.jobs),
            saved_jobs: Arc::clone(&stores.saved_jobs),
            applications: Arc::clone(&stores.applications),
            weights: ScoringWeights::default(),
            default_limit,
        }
    }

    #[cfg(test)]
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Top jobs for `user_id`, at most `limit` (or the configured default).
    pub async fn recommend(&self, user_id: &str, limit: Option<usize>) -> Vec<ScoredJob> {
        let limit = limit.unwrap_or(self.default_limit);

        // Independent reads; order among them does not matter.
        let (user, jobs, saved, applications) = tokio::join!(
            self.users.get_by_id(user_id),
            self.jobs.get_all(),
            self.saved_jobs.get_all(),
            self.applications.get_all(),
        );

        let jobs = match jobs {
            Ok(jobs) => jobs,
            Err(err) => {
                error!(user_id, error = %err, "Job listing unavailable, no recommendations");
                return Vec::new();
            }
        };

        match self.rank_snapshot(user, &jobs, saved, applications, limit) {
            Ok(ranked) => {
                debug!(user_id, count = ranked.len(), "Recommendations computed");
                ranked
            }
            Err(err) => {
                log_fallback(user_id, &err);
                most_recent(jobs, limit)
                    .into_iter()
                    .map(ScoredJob::unscored)
                    .collect()
            }
        }
    }

    fn rank_snapshot(
        &self,
        user: Result<UserProfile, StoreError>,
        jobs: &[Job],
        saved: Result<Vec<SavedJob>, StoreError>,
        applications: Result<Vec<Application>, StoreError>,
        limit: usize,
    ) -> Result<Vec<ScoredJob>, RecommendationError> {
        let user = user?;
        let saved = saved?;
        let applications = applications?;
        rank_jobs(
            &user,
            jobs,
            &saved,
            &applications,
            Utc::now(),
            limit,
            &self.weights,
        )
    }
}

/// Unknown users are an expected condition; anything else points at bad data
/// or a broken store and is logged as an error.
fn log_fallback(user_id: &str, err: &RecommendationError) {
    match err {
        RecommendationError::Store(store_err) if store_err.is_not_found() => {
            warn!(user_id, error = %err, "Recommendations fell back to recent jobs");
        }
        _ => {
            error!(user_id, error = %err, "Recommendation pass failed, falling back to recent jobs");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::application::ApplicationStatus;
    use crate::models::job::JobType;
    use crate::seed::SeedData;
    use crate::store::{Entity, Latency};
    use async_trait::async_trait;
    use chrono::Duration;

    /// A store whose every call fails with an unexpected error.
    struct CorruptStore;

    #[async_trait]
    impl<E: Entity> Repository<E> for CorruptStore {
        async fn get_all(&self) -> Result<Vec<E>, StoreError> {
            Err(StoreError::Invalid("corrupt record".to_string()))
        }
        async fn get_by_id(&self, _id: &str) -> Result<E, StoreError> {
            Err(StoreError::Invalid("corrupt record".to_string()))
        }
        async fn create(&self, _new: E::New) -> Result<E, StoreError> {
            Err(StoreError::Invalid("corrupt record".to_string()))
        }
        async fn update(&self, _id: &str, _patch: E::Patch) -> Result<E, StoreError> {
            Err(StoreError::Invalid("corrupt record".to_string()))
        }
        async fn delete(&self, _id: &str) -> Result<(), StoreError> {
            Err(StoreError::Invalid("corrupt record".to_string()))
        }
    }

    fn job(id: &str, requirements: &[&str], hours_ago: i64) -> Job {
        Job {
            id: id.to_string(),
            title: format!("Engineer {id}"),
            company: "Acme Corp".to_string(),
            company_id: None,
            location: "Austin, TX".to_string(),
            job_type: JobType::FullTime,
            description: String::new(),
            requirements: requirements.iter().map(|r| r.to_string()).collect(),
            salary: None,
            posted_date: Utc::now() - Duration::hours(hours_ago),
        }
    }

    fn user() -> UserProfile {
        UserProfile {
            id: "user1".to_string(),
            name: "Jordan Lee".to_string(),
            email: "jordan@example.com".to_string(),
            phone: None,
            location: "Austin".to_string(),
            headline: None,
            summary: None,
            skills: vec!["Rust".to_string()],
            preferred_job_types: vec![JobType::FullTime],
            experience: vec![],
            education: vec![],
            resume_url: None,
            created_at: Utc::now(),
        }
    }

    fn application(job_id: &str) -> Application {
        Application {
            id: format!("app-{job_id}"),
            user_id: "user1".to_string(),
            job_id: job_id.to_string(),
            job_title: String::new(),
            company: "Acme Corp".to_string(),
            resume_url: "default-resume.pdf".to_string(),
            cover_letter: String::new(),
            status: ApplicationStatus::Interview,
            applied_date: Utc::now(),
        }
    }

    fn seed() -> SeedData {
        SeedData {
            jobs: vec![
                job("rust-new", &["rust"], 1),
                job("rust-old", &["rust"], 24 * 10),
                job("java-new", &["java"], 2),
                job("applied", &["rust"], 0),
                job("go-mid", &["go"], 48),
                job("oldest", &["cobol"], 24 * 30),
            ],
            users: vec![user()],
            saved_jobs: vec![],
            applications: vec![application("applied")],
            companies: vec![],
        }
    }

    fn recommender(seed: SeedData) -> Recommender {
        let stores = Stores::in_memory(seed, Latency::none());
        Recommender::new(&stores, DEFAULT_RECOMMENDATION_LIMIT)
    }

    #[tokio::test]
    async fn test_recommend_ranks_and_excludes_applied() {
        let recs = recommender(seed()).recommend("user1", None).await;

        assert_eq!(recs.len(), 4);
        assert_eq!(recs[0].job.id, "rust-new");
        assert!(recs.iter().all(|r| r.job.id != "applied"));
        assert!(recs.iter().all(|r| r.recommendation_score.is_some()));
    }

    #[tokio::test]
    async fn test_explicit_limit_overrides_default() {
        let engine = recommender(seed());
        assert_eq!(engine.recommend("user1", Some(2)).await.len(), 2);
        assert_eq!(engine.recommend("user1", Some(50)).await.len(), 5);
        assert!(engine.recommend("user1", Some(0)).await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_user_falls_back_to_recent_unscored() {
        let recs = recommender(seed()).recommend("nobody", None).await;

        let ids: Vec<&str> = recs.iter().map(|r| r.job.id.as_str()).collect();
        assert_eq!(ids, vec!["applied", "rust-new", "java-new", "go-mid"]);
        assert!(recs.iter().all(|r| r.recommendation_score.is_none()));
    }

    #[tokio::test]
    async fn test_store_failure_falls_back() {
        let mut stores = Stores::in_memory(seed(), Latency::none());
        stores.applications = Arc::new(CorruptStore);
        let engine = Recommender::new(&stores, DEFAULT_RECOMMENDATION_LIMIT);

        let recs = engine.recommend("user1", None).await;
        assert_eq!(recs.len(), 4);
        assert!(recs.iter().all(|r| r.recommendation_score.is_none()));
    }

    #[tokio::test]
    async fn test_invalid_score_falls_back() {
        let stores = Stores::in_memory(seed(), Latency::none());
        let engine = Recommender::new(&stores, DEFAULT_RECOMMENDATION_LIMIT).with_weights(
            ScoringWeights {
                skills: 400.0,
                ..Default::default()
            },
        );

        let recs = engine.recommend("user1", None).await;
        assert_eq!(recs.len(), 4);
        assert!(recs.iter().all(|r| r.recommendation_score.is_none()));
    }

    #[tokio::test]
    async fn test_unavailable_job_listing_returns_empty() {
        let mut stores = Stores::in_memory(seed(), Latency::none());
        stores.jobs = Arc::new(CorruptStore);
        let engine = Recommender::new(&stores, DEFAULT_RECOMMENDATION_LIMIT);
        assert!(engine.recommend("user1", None).await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_job_collection_returns_empty() {
        let seed = SeedData {
            users: vec![user()],
            ..Default::default()
        };
        assert!(recommender(seed).recommend("user1", None).await.is_empty());
    }

    #[tokio::test]
    async fn test_recommend_is_idempotent() {
        let engine = recommender(seed());
        let first = engine.recommend("user1", None).await;
        let second = engine.recommend("user1", None).await;
        let first_ids: Vec<&str> = first.iter().map(|r| r.job.id.as_str()).collect();
        let second_ids: Vec<&str> = second.iter().map(|r| r.job.id.as_str()).collect();
        assert_eq!(first_ids, second_ids);
    }
}
