//! Axum route handlers for the Applications API.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::applications::tracker::{filter_and_sort, ApplicationQuery, StatusCounts};
use crate::applications::{submit_application, SubmitApplication};
use crate::errors::AppError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::models::application::{Application, ApplicationPatch};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub user_id: Option<String>,
}

/// GET /api/v1/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ApplicationQuery>,
) -> Result<Json<Vec<Application>>, AppError> {
    let applications = state.stores.applications.get_all().await?;
    Ok(Json(filter_and_sort(applications, &query)))
}

/// GET /api/v1/applications/stats
pub async fn handle_application_stats(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<StatsQuery>,
) -> Result<Json<StatusCounts>, AppError> {
    let applications = state.stores.applications.get_all().await?;
    let counts = StatusCounts::tally(
        applications
            .iter()
            .filter(|a| query.user_id.as_deref().map_or(true, |u| a.user_id == u)),
    );
    Ok(Json(counts))
}

/// POST /api/v1/applications
pub async fn handle_submit_application(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SubmitApplication>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    let application = submit_application(&state.stores, request).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// PATCH /api/v1/applications/:id
pub async fn handle_update_application(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(patch): ApiJson<ApplicationPatch>,
) -> Result<Json<Application>, AppError> {
    let application = state.stores.applications.update(&id, patch).await?;
    info!(application_id = %id, status = ?application.status, "Application updated");
    Ok(Json(application))
}

/// DELETE /api/v1/applications/:id
///
/// Withdraws the application.
pub async fn handle_withdraw_application(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<StatusCode, AppError> {
    state.stores.applications.delete(&id).await?;
    info!(application_id = %id, "Application withdrawn");
    Ok(StatusCode::NO_CONTENT)
}
