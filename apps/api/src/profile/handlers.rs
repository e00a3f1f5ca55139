//! Axum route handlers for user profiles.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::models::user::{NewUser, UserPatch, UserProfile};
use crate::profile::resume::accept_resume;
use crate::state::AppState;

/// Multipart field carrying the resume file.
const RESUME_FIELD: &str = "resume";

/// GET /api/v1/users/:id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<String>,
) -> Result<Json<UserProfile>, AppError> {
    Ok(Json(state.stores.users.get_by_id(&user_id).await?))
}

/// POST /api/v1/users
pub async fn handle_create_profile(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewUser>,
) -> Result<(StatusCode, Json<UserProfile>), AppError> {
    let user = state.stores.users.create(new).await?;
    info!(user_id = %user.id, "Profile created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// PATCH /api/v1/users/:id
pub async fn handle_update_profile(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<String>,
    ApiJson(patch): ApiJson<UserPatch>,
) -> Result<Json<UserProfile>, AppError> {
    let user = state.stores.users.update(&user_id, patch).await?;
    info!(user_id = %user.id, "Profile updated");
    Ok(Json(user))
}

/// POST /api/v1/users/:id/resume
///
/// Accepts a multipart upload, validates it, and records a synthetic storage
/// key as the profile's `resume_url`. Nothing is written to disk.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<String>,
    mut multipart: Multipart,
) -> Result<Json<UserProfile>, AppError> {
    state.stores.users.get_by_id(&user_id).await?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data: Bytes = field.bytes().await?;

        let key = accept_resume(&user_id, &file_name, content_type.as_deref(), &data)?;
        let user = state
            .stores
            .users
            .update(
                &user_id,
                UserPatch {
                    resume_url: Some(key),
                    ..Default::default()
                },
            )
            .await?;
        info!(user_id = %user.id, bytes = data.len(), "Resume uploaded");
        return Ok(Json(user));
    }

    Err(AppError::Validation(format!(
        "multipart field '{RESUME_FIELD}' is required"
    )))
}
