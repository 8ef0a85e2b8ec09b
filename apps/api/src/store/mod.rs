//! Persistence seams.
//!
//! Handlers never talk to Postgres directly; they go through these traits so
//! the HTTP layer and the services can be exercised against the in-memory
//! store in tests. `AppState` carries each one as an `Arc<dyn ...>`.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::cv::{AnalysisUpdate, CvRow, InsertedCv, NewCv};
use crate::models::job_post::JobPost;
use crate::models::user::{User, UserStatus};

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[async_trait]
pub trait JobPostStore: Send + Sync {
    async fn insert_job_post(&self, title: &str, description: &str) -> Result<JobPost, AppError>;

    /// Newest first.
    async fn list_job_posts(&self) -> Result<Vec<JobPost>, AppError>;
}

#[async_trait]
pub trait CvStore: Send + Sync {
    async fn insert_cv(&self, cv: NewCv) -> Result<InsertedCv, AppError>;

    /// Every CV joined with candidate and job posting, newest first.
    async fn list_cvs(&self) -> Result<Vec<CvRow>, AppError>;

    async fn find_cv(&self, id: i64) -> Result<Option<CvRow>, AppError>;

    /// Writes all analysis columns in one statement. Returns the number of
    /// rows touched (0 when `id` does not exist).
    async fn record_analysis(&self, id: i64, update: &AnalysisUpdate) -> Result<u64, AppError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Pending accounts, newest first.
    async fn list_pending_users(&self) -> Result<Vec<User>, AppError>;

    /// Sets `status` and bumps `updated_at`. `None` when no such user.
    async fn set_user_status(&self, id: i64, status: UserStatus) -> Result<Option<User>, AppError>;
}
