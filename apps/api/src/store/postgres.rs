use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::cv::{AnalysisUpdate, CvRow, InsertedCv, NewCv};
use crate::models::job_post::JobPost;
use crate::models::user::{User, UserStatus};
use crate::store::{CvStore, JobPostStore, UserStore};

const CV_SELECT: &str = r#"
    SELECT
        uc.id AS cv_id,
        uc.user_id,
        u.full_name AS candidate_name,
        u.email AS candidate_email,
        uc.job_post_id,
        jp.title AS job_title,
        jp.description AS job_description,
        uc.file_name,
        uc.original_name,
        uc.file_path,
        uc.raw_text,
        uc.created_at,
        uc.analysis_score,
        uc.analysis_notes,
        uc.analysis_pros,
        uc.analysis_cons,
        uc.analysis_email_draft
    FROM uploaded_cvs uc
    LEFT JOIN users u ON u.id = uc.user_id
    LEFT JOIN job_posts jp ON jp.id = uc.job_post_id
"#;

/// Postgres-backed implementation of every store trait.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobPostStore for PgStore {
    async fn insert_job_post(&self, title: &str, description: &str) -> Result<JobPost, AppError> {
        Ok(sqlx::query_as::<_, JobPost>(
            r#"
            INSERT INTO job_posts (title, description)
            VALUES ($1, $2)
            RETURNING id, title, description, created_at
            "#,
        )
        .bind(title)
        .bind(description)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn list_job_posts(&self) -> Result<Vec<JobPost>, AppError> {
        Ok(sqlx::query_as::<_, JobPost>(
            "SELECT id, title, description, created_at FROM job_posts ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?)
    }
}

#[async_trait]
impl CvStore for PgStore {
    async fn insert_cv(&self, cv: NewCv) -> Result<InsertedCv, AppError> {
        Ok(sqlx::query_as::<_, InsertedCv>(
            r#"
            INSERT INTO uploaded_cvs
                (user_id, job_post_id, file_name, original_name, file_path, raw_text)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, job_post_id, created_at
            "#,
        )
        .bind(cv.user_id)
        .bind(cv.job_post_id)
        .bind(&cv.file_name)
        .bind(&cv.original_name)
        .bind(&cv.file_path)
        .bind(&cv.raw_text)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn list_cvs(&self) -> Result<Vec<CvRow>, AppError> {
        let sql = format!("{CV_SELECT} ORDER BY uc.created_at DESC, uc.id DESC");
        Ok(sqlx::query_as::<_, CvRow>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_cv(&self, id: i64) -> Result<Option<CvRow>, AppError> {
        let sql = format!("{CV_SELECT} WHERE uc.id = $1 LIMIT 1");
        Ok(sqlx::query_as::<_, CvRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn record_analysis(&self, id: i64, update: &AnalysisUpdate) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE uploaded_cvs
            SET analysis_score = $1,
                analysis_notes = $2,
                analysis_pros = $3,
                analysis_cons = $4,
                analysis_email_draft = $5
            WHERE id = $6
            "#,
        )
        .bind(update.score)
        .bind(&update.notes)
        .bind(&update.pros_json)
        .bind(&update.cons_json)
        .bind(&update.email_draft)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(sqlx::query_as::<_, User>(
            "SELECT id, full_name, email, role, status, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn list_pending_users(&self) -> Result<Vec<User>, AppError> {
        Ok(sqlx::query_as::<_, User>(
            r#"
            SELECT id, full_name, email, role, status, created_at, updated_at
            FROM users
            WHERE status = 'pending'
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn set_user_status(&self, id: i64, status: UserStatus) -> Result<Option<User>, AppError> {
        Ok(sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, full_name, email, role, status, created_at, updated_at
            "#,
        )
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }
}
