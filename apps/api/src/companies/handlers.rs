//! Axum route handlers for the company directory.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::companies::directory::{query_companies, CompanyQuery};
use crate::errors::AppError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::models::company::{Company, CompanyPatch, NewCompany};
use crate::state::AppState;

/// GET /api/v1/companies
pub async fn handle_list_companies(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CompanyQuery>,
) -> Result<Json<Vec<Company>>, AppError> {
    let companies = state.stores.companies.get_all().await?;
    Ok(Json(query_companies(companies, &query)))
}

/// GET /api/v1/companies/:id
pub async fn handle_get_company(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Company>, AppError> {
    Ok(Json(state.stores.companies.get_by_id(&id).await?))
}

/// POST /api/v1/companies
pub async fn handle_create_company(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewCompany>,
) -> Result<(StatusCode, Json<Company>), AppError> {
    let company = state.stores.companies.create(new).await?;
    info!(company_id = %company.id, name = %company.name, "Company added");
    Ok((StatusCode::CREATED, Json(company)))
}

/// PATCH /api/v1/companies/:id
pub async fn handle_update_company(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(patch): ApiJson<CompanyPatch>,
) -> Result<Json<Company>, AppError> {
    Ok(Json(state.stores.companies.update(&id, patch).await?))
}

/// DELETE /api/v1/companies/:id
pub async fn handle_delete_company(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<StatusCode, AppError> {
    state.stores.companies.delete(&id).await?;
    info!(company_id = %id, "Company removed");
    Ok(StatusCode::NO_CONTENT)
}
