pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::applications::handlers as applications;
use crate::companies::handlers as companies;
use crate::dashboard::handlers as dashboard;
use crate::jobs::handlers as jobs;
use crate::profile::handlers as profile;
use crate::profile::resume::MAX_RESUME_BYTES;
use crate::recommendation::handlers as recommendation;
use crate::saved_jobs::handlers as saved_jobs;
use crate::state::AppState;

/// Headroom for multipart boundaries and headers around the resume file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs
        .route(
            "/api/v1/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route("/api/v1/jobs/recent", get(jobs::handle_recent_jobs))
        .route(
            "/api/v1/jobs/:id",
            get(jobs::handle_get_job)
                .patch(jobs::handle_update_job)
                .delete(jobs::handle_delete_job),
        )
        // Profiles
        .route("/api/v1/users", post(profile::handle_create_profile))
        .route(
            "/api/v1/users/:id",
            get(profile::handle_get_profile).patch(profile::handle_update_profile),
        )
        .route(
            "/api/v1/users/:id/resume",
            post(profile::handle_upload_resume)
                .layer(DefaultBodyLimit::max(MAX_RESUME_BYTES + MULTIPART_OVERHEAD_BYTES)),
        )
        .route(
            "/api/v1/users/:id/recommendations",
            get(recommendation::handle_recommendations),
        )
        .route("/api/v1/users/:id/dashboard", get(dashboard::handle_dashboard))
        // Saved jobs
        .route(
            "/api/v1/users/:id/saved-jobs",
            get(saved_jobs::handle_list_saved),
        )
        .route(
            "/api/v1/users/:id/saved-jobs/:job_id",
            put(saved_jobs::handle_save).delete(saved_jobs::handle_unsave),
        )
        // Applications
        .route(
            "/api/v1/applications",
            get(applications::handle_list_applications)
                .post(applications::handle_submit_application),
        )
        .route(
            "/api/v1/applications/stats",
            get(applications::handle_application_stats),
        )
        .route(
            "/api/v1/applications/:id",
            axum::routing::patch(applications::handle_update_application)
                .delete(applications::handle_withdraw_application),
        )
        // Companies
        .route(
            "/api/v1/companies",
            get(companies::handle_list_companies).post(companies::handle_create_company),
        )
        .route(
            "/api/v1/companies/:id",
            get(companies::handle_get_company)
                .patch(companies::handle_update_company)
                .delete(companies::handle_delete_company),
        )
        .with_state(state)
}
