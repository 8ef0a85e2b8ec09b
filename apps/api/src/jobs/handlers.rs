//! Axum route handlers for job postings.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::auth::AdminUser;
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::jobs::service::{create_job_post, list_job_posts, CreateJobPostRequest};
use crate::models::job_post::JobPost;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JobPostResponse {
    pub ok: bool,
    pub job: JobPost,
}

#[derive(Debug, Serialize)]
pub struct JobPostListResponse {
    pub ok: bool,
    pub jobs: Vec<JobPost>,
}

/// POST /job-posts
pub async fn handle_create_job_post(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiJson(request): ApiJson<CreateJobPostRequest>,
) -> Result<(StatusCode, Json<JobPostResponse>), AppError> {
    let job = create_job_post(state.jobs.as_ref(), &request).await?;
    Ok((StatusCode::CREATED, Json(JobPostResponse { ok: true, job })))
}

/// GET /job-posts
pub async fn handle_list_job_posts(
    State(state): State<AppState>,
) -> Result<Json<JobPostListResponse>, AppError> {
    let jobs = list_job_posts(state.jobs.as_ref()).await?;
    Ok(Json(JobPostListResponse { ok: true, jobs }))
}
