//! Axum route handlers for the Jobs API.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::jobs::search::{filter_jobs, most_recent, JobFilter};
use crate::models::job::{Job, JobPatch, NewJob};
use crate::state::AppState;

/// Featured jobs on the landing page.
const DEFAULT_RECENT_LIMIT: usize = 3;

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<JobFilter>,
) -> Result<Json<Vec<Job>>, AppError> {
    let jobs = state.stores.jobs.get_all().await?;
    Ok(Json(filter_jobs(jobs, &filter)))
}

/// GET /api/v1/jobs/recent
pub async fn handle_recent_jobs(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<RecentQuery>,
) -> Result<Json<Vec<Job>>, AppError> {
    let jobs = state.stores.jobs.get_all().await?;
    Ok(Json(most_recent(
        jobs,
        query.limit.unwrap_or(DEFAULT_RECENT_LIMIT),
    )))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Job>, AppError> {
    Ok(Json(state.stores.jobs.get_by_id(&id).await?))
}

/// POST /api/v1/jobs
///
/// A `company_id`, when given, must name a company in the directory.
pub async fn handle_create_job(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewJob>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    if let Some(company_id) = &new.company_id {
        ensure_company_exists(&state, company_id).await?;
    }
    let job = state.stores.jobs.create(new).await?;
    info!(job_id = %job.id, company = %job.company, "Job posted");
    Ok((StatusCode::CREATED, Json(job)))
}

/// PATCH /api/v1/jobs/:id
pub async fn handle_update_job(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(patch): ApiJson<JobPatch>,
) -> Result<Json<Job>, AppError> {
    if let Some(company_id) = &patch.company_id {
        ensure_company_exists(&state, company_id).await?;
    }
    Ok(Json(state.stores.jobs.update(&id, patch).await?))
}

/// DELETE /api/v1/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<StatusCode, AppError> {
    state.stores.jobs.delete(&id).await?;
    info!(job_id = %id, "Job removed");
    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_company_exists(state: &AppState, company_id: &str) -> Result<(), AppError> {
    match state.stores.companies.get_by_id(company_id).await {
        Ok(_) => Ok(()),
        Err(e) if e.is_not_found() => Err(AppError::Validation(format!(
            "company_id '{company_id}' does not match any company"
        ))),
        Err(e) => Err(e.into()),
    }
}
