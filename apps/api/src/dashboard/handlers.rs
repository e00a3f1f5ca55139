use axum::{
    extract::State,
    Json,
};

use crate::dashboard::{build_dashboard, DashboardSummary};
use crate::errors::AppError;
use crate::extract::ApiPath;
use crate::state::AppState;

/// GET /api/v1/users/:id/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<String>,
) -> Result<Json<DashboardSummary>, AppError> {
    let summary = build_dashboard(&state.stores, &state.recommender, &user_id).await?;
    Ok(Json(summary))
}
