//! Account moderation: pending accounts are approved (active) or rejected.

use tracing::info;

use crate::errors::AppError;
use crate::models::user::{User, UserStatus};
use crate::store::UserStore;

pub async fn list_pending_users(users: &dyn UserStore) -> Result<Vec<User>, AppError> {
    users.list_pending_users().await
}

pub async fn approve_user(users: &dyn UserStore, id: i64) -> Result<User, AppError> {
    set_status(users, id, UserStatus::Active).await
}

pub async fn reject_user(users: &dyn UserStore, id: i64) -> Result<User, AppError> {
    set_status(users, id, UserStatus::Rejected).await
}

async fn set_status(users: &dyn UserStore, id: i64, status: UserStatus) -> Result<User, AppError> {
    let user = users
        .set_user_status(id, status)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {id} not found")))?;
    info!("User {id} is now {}", status.as_str());
    Ok(user)
}
