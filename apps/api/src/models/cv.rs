use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One `uploaded_cvs` row joined with its candidate and (optional) job posting.
///
/// `analysis_pros` / `analysis_cons` hold the raw serialized JSON exactly as
/// stored; decoding happens at the query-service layer so a bad value only
/// affects its own row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CvRow {
    pub cv_id: i64,
    pub user_id: i64,
    pub candidate_name: Option<String>,
    pub candidate_email: Option<String>,
    pub job_post_id: Option<i64>,
    pub job_title: Option<String>,
    pub job_description: Option<String>,
    pub file_name: String,
    pub original_name: String,
    pub file_path: String,
    pub raw_text: String,
    pub created_at: DateTime<Utc>,
    pub analysis_score: Option<i32>,
    pub analysis_notes: Option<String>,
    pub analysis_pros: Option<String>,
    pub analysis_cons: Option<String>,
    pub analysis_email_draft: Option<String>,
}

/// Values written by a single upload.
#[derive(Debug, Clone)]
pub struct NewCv {
    pub user_id: i64,
    pub job_post_id: Option<i64>,
    pub file_name: String,
    pub original_name: String,
    pub file_path: String,
    pub raw_text: String,
}

/// Columns returned by the upload INSERT.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InsertedCv {
    pub id: i64,
    pub job_post_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// All analysis columns, written together in one UPDATE.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisUpdate {
    pub score: i32,
    pub notes: String,
    pub pros_json: String,
    pub cons_json: String,
    pub email_draft: String,
}

/// Serializes an ordered list of analysis points for a TEXT column.
pub fn encode_points(points: &[String]) -> String {
    serde_json::to_string(points).unwrap_or_else(|_| "[]".to_string())
}

/// Reads back a list written by [`encode_points`]. Absent or malformed values
/// (including JSON that is not an array of strings) decode to an empty list.
pub fn decode_points(stored: Option<&str>) -> Vec<String> {
    stored
        .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok())
        .unwrap_or_default()
}
