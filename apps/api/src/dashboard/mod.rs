//! Dashboard: per-user summary of activity plus recommendations.

pub mod handlers;

use serde::Serialize;

use crate::applications::tracker::{filter_and_sort, ApplicationQuery, StatusCounts};
use crate::errors::AppError;
use crate::jobs::search::most_recent;
use crate::models::application::Application;
use crate::models::job::Job;
use crate::models::saved_job::SavedJob;
use crate::recommendation::{Recommender, ScoredJob};
use crate::state::Stores;

const RECENT_JOBS: usize = 5;
const RECENT_APPLICATIONS: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub saved_jobs: usize,
    pub applications: usize,
    pub pending_applications: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub stats: DashboardStats,
    pub recent_jobs: Vec<Job>,
    pub recent_applications: Vec<Application>,
    pub recommendations: Vec<ScoredJob>,
}

pub async fn build_dashboard(
    stores: &Stores,
    recommender: &Recommender,
    user_id: &str,
) -> Result<DashboardSummary, AppError> {
    stores.users.get_by_id(user_id).await?;

    let (snapshot, recommendations) = tokio::join!(
        async {
            tokio::try_join!(
                stores.jobs.get_all(),
                stores.saved_jobs.get_all(),
                stores.applications.get_all(),
            )
        },
        recommender.recommend(user_id, None),
    );
    let (jobs, saved, applications) = snapshot?;

    Ok(summarize(user_id, jobs, &saved, applications, recommendations))
}

fn summarize(
    user_id: &str,
    jobs: Vec<Job>,
    saved: &[SavedJob],
    applications: Vec<Application>,
    recommendations: Vec<ScoredJob>,
) -> DashboardSummary {
    let own_applications = filter_and_sort(
        applications,
        &ApplicationQuery {
            user_id: Some(user_id.to_string()),
            ..Default::default()
        },
    );
    let counts = StatusCounts::tally(&own_applications);

    DashboardSummary {
        stats: DashboardStats {
            saved_jobs: saved.iter().filter(|s| s.user_id == user_id).count(),
            applications: counts.total,
            pending_applications: counts.pending,
        },
        recent_jobs: most_recent(jobs, RECENT_JOBS),
        recent_applications: own_applications
            .into_iter()
            .take(RECENT_APPLICATIONS)
            .collect(),
        recommendations,
    }
}
