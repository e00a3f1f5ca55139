//! Application tracker: submitting, listing and updating job applications.

pub mod handlers;
pub mod tracker;

use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::application::{Application, ApplicationStatus, NewApplication};
use crate::state::Stores;

/// Used when neither the request nor the profile carries a resume.
pub const DEFAULT_RESUME_URL: &str = "default-resume.pdf";

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitApplication {
    pub user_id: String,
    pub job_id: String,
    pub cover_letter: String,
    #[serde(default)]
    pub resume_url: Option<String>,
}

/// Submits a pending application, copying the job's title and company.
pub async fn submit_application(
    stores: &Stores,
    request: SubmitApplication,
) -> Result<Application, AppError> {
    if request.cover_letter.trim().is_empty() {
        return Err(AppError::Validation("cover_letter cannot be empty".to_string()));
    }

    let (user, job) = tokio::try_join!(
        stores.users.get_by_id(&request.user_id),
        stores.jobs.get_by_id(&request.job_id),
    )?;

    let resume_url = request
        .resume_url
        .filter(|url| !url.trim().is_empty())
        .or(user.resume_url)
        .unwrap_or_else(|| DEFAULT_RESUME_URL.to_string());

    let application = stores
        .applications
        .create(NewApplication {
            user_id: user.id,
            job_id: job.id,
            job_title: job.title,
            company: job.company,
            resume_url,
            cover_letter: request.cover_letter,
            status: ApplicationStatus::Pending,
            applied_date: None,
        })
        .await?;

    info!(
        application_id = %application.id,
        user_id = %application.user_id,
        job_id = %application.job_id,
        "Application submitted"
    );
    Ok(application)
}
