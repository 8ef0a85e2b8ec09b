use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An open position candidates apply against. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPost {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
