use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::extract::ApiPath;
use crate::models::saved_job::SavedJob;
use crate::saved_jobs::{list_saved_jobs, save_job, unsave_job, SavedJobView};
use crate::state::AppState;

/// GET /api/v1/users/:id/saved-jobs
pub async fn handle_list_saved(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<String>,
) -> Result<Json<Vec<SavedJobView>>, AppError> {
    Ok(Json(list_saved_jobs(&state.stores, &user_id).await?))
}

/// PUT /api/v1/users/:id/saved-jobs/:job_id
pub async fn handle_save(
    State(state): State<AppState>,
    ApiPath((user_id, job_id)): ApiPath<(String, String)>,
) -> Result<(StatusCode, Json<SavedJob>), AppError> {
    let saved = save_job(&state.stores, &user_id, &job_id).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// DELETE /api/v1/users/:id/saved-jobs/:job_id
pub async fn handle_unsave(
    State(state): State<AppState>,
    ApiPath((user_id, job_id)): ApiPath<(String, String)>,
) -> Result<StatusCode, AppError> {
    unsave_job(&state.stores, &user_id, &job_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
