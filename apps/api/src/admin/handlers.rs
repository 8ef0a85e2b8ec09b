//! Axum route handlers for the admin API. Every route requires an admin.

use axum::{
    extract::State,
    Json,
};
use serde::Serialize;

use crate::admin::queries::{get_cv, list_cvs, CvDetail, CvSummary};
use crate::admin::users::{approve_user, list_pending_users, reject_user};
use crate::auth::AdminUser;
use crate::errors::AppError;
use crate::extract::ApiPath;
use crate::models::user::User;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CvListResponse {
    pub ok: bool,
    pub cvs: Vec<CvSummary>,
}

#[derive(Debug, Serialize)]
pub struct CvDetailResponse {
    pub ok: bool,
    pub cv: CvDetail,
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub ok: bool,
    pub users: Vec<User>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub ok: bool,
    pub user: User,
}

/// GET /admin/cvs
pub async fn handle_list_cvs(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<CvListResponse>, AppError> {
    let cvs = list_cvs(state.cvs.as_ref()).await?;
    Ok(Json(CvListResponse { ok: true, cvs }))
}

/// GET /admin/cvs/:id
pub async fn handle_get_cv(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<CvDetailResponse>, AppError> {
    let cv = get_cv(state.cvs.as_ref(), id).await?;
    Ok(Json(CvDetailResponse { ok: true, cv }))
}

/// GET /admin/pending-users
pub async fn handle_pending_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<UserListResponse>, AppError> {
    let users = list_pending_users(state.users.as_ref()).await?;
    Ok(Json(UserListResponse { ok: true, users }))
}

/// PATCH /admin/approve-user/:id
pub async fn handle_approve_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<UserResponse>, AppError> {
    let user = approve_user(state.users.as_ref(), id).await?;
    Ok(Json(UserResponse { ok: true, user }))
}

/// PATCH /admin/reject-user/:id
pub async fn handle_reject_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<UserResponse>, AppError> {
    let user = reject_user(state.users.as_ref(), id).await?;
    Ok(Json(UserResponse { ok: true, user }))
}
