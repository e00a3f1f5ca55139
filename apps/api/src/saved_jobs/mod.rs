//! Saved jobs: a user's bookmarks, keyed by (user_id, job_id).

pub mod handlers;

use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::job::Job;
use crate::models::saved_job::{NewSavedJob, SavedJob};
use crate::state::Stores;

/// A saved record joined with the job it points at.
#[derive(Debug, Clone, Serialize)]
pub struct SavedJobView {
    #[serde(flatten)]
    pub saved: SavedJob,
    pub job: Job,
}

/// Bookmarks `job_id` for `user_id`. Both must exist; saving twice conflicts.
pub async fn save_job(stores: &Stores, user_id: &str, job_id: &str) -> Result<SavedJob, AppError> {
    tokio::try_join!(stores.users.get_by_id(user_id), stores.jobs.get_by_id(job_id))?;

    let saved = stores
        .saved_jobs
        .create(NewSavedJob {
            user_id: user_id.to_string(),
            job_id: job_id.to_string(),
            saved_date: None,
        })
        .await?;
    info!(user_id, job_id, "Job saved");
    Ok(saved)
}

pub async fn unsave_job(stores: &Stores, user_id: &str, job_id: &str) -> Result<(), AppError> {
    let record = stores
        .saved_jobs
        .get_all()
        .await?
        .into_iter()
        .find(|s| s.user_id == user_id && s.job_id == job_id)
        .ok_or_else(|| {
            AppError::NotFound(format!("Job {job_id} is not saved by user {user_id}"))
        })?;

    stores.saved_jobs.delete(&record.id).await?;
    info!(user_id, job_id, "Job unsaved");
    Ok(())
}

/// The user's saved jobs, newest bookmark first. Records whose job has since
/// been removed are skipped.
pub async fn list_saved_jobs(stores: &Stores, user_id: &str) -> Result<Vec<SavedJobView>, AppError> {
    let (_, saved, jobs) = tokio::try_join!(
        stores.users.get_by_id(user_id),
        stores.saved_jobs.get_all(),
        stores.jobs.get_all(),
    )?;

    let mut views: Vec<SavedJobView> = saved
        .into_iter()
        .filter(|s| s.user_id == user_id)
        .filter_map(|s| {
            let job = jobs.iter().find(|j| j.id == s.job_id)?.clone();
            Some(SavedJobView { saved: s, job })
        })
        .collect();
    views.sort_by(|a, b| b.saved.saved_date.cmp(&a.saved.saved_date));
    Ok(views)
}
