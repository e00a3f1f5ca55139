use axum::{
    extract::State,
    Json,
};
use serde::Deserialize;

use crate::extract::{ApiPath, ApiQuery};
use crate::recommendation::ScoredJob;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub limit: Option<usize>,
}

/// GET /api/v1/users/:id/recommendations
///
/// Always 200 once the request parses: unknown users and store failures
/// yield the unscored most-recent list instead of an error.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<String>,
    ApiQuery(query): ApiQuery<RecommendationQuery>,
) -> Json<Vec<ScoredJob>> {
    Json(state.recommender.recommend(&user_id, query.limit).await)
}
