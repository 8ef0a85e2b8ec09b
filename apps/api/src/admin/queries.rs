//! Read side for stored CVs.
//!
//! Rows are reshaped into explicit DTOs here: text is cut to a preview and the
//! JSON-encoded pros/cons are decoded, one row at a time, so a malformed value
//! never fails the whole listing.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::cv::{decode_points, CvRow};
use crate::store::CvStore;
use crate::text::char_prefix;

/// Characters of CV text included in list and detail previews.
pub const CV_PREVIEW_CHARS: usize = 1500;

#[derive(Debug, Clone, Serialize)]
pub struct CvSummary {
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
    pub created_at: DateTime<Utc>,
    pub raw_text_preview: String,
    pub analysis_score: Option<i32>,
    pub analysis_notes: Option<String>,
    pub analysis_pros: Vec<String>,
    pub analysis_cons: Vec<String>,
    pub analysis_email_draft: Option<String>,
    /// Ready-to-open compose link; present once a draft exists.
    pub mailto: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CvDetail {
    #[serde(flatten)]
    pub summary: CvSummary,
    pub raw_text: String,
}

impl From<CvRow> for CvDetail {
    fn from(row: CvRow) -> Self {
        let mailto = match (&row.candidate_email, &row.analysis_email_draft) {
            (Some(email), Some(draft)) => mailto_link(email, row.job_title.as_deref(), draft),
            _ => None,
        };

        CvDetail {
            summary: CvSummary {
                cv_id: row.cv_id,
                user_id: row.user_id,
                candidate_name: row.candidate_name,
                candidate_email: row.candidate_email,
                job_post_id: row.job_post_id,
                job_title: row.job_title,
                job_description: row.job_description,
                file_name: row.file_name,
                original_name: row.original_name,
                file_path: row.file_path,
                created_at: row.created_at,
                raw_text_preview: char_prefix(&row.raw_text, CV_PREVIEW_CHARS).to_string(),
                analysis_score: row.analysis_score,
                analysis_notes: row.analysis_notes,
                analysis_pros: decode_points(row.analysis_pros.as_deref()),
                analysis_cons: decode_points(row.analysis_cons.as_deref()),
                analysis_email_draft: row.analysis_email_draft,
                mailto,
            },
            raw_text: row.raw_text,
        }
    }
}

impl From<CvRow> for CvSummary {
    fn from(row: CvRow) -> Self {
        CvDetail::from(row).summary
    }
}

/// Every stored CV, newest first.
pub async fn list_cvs(cvs: &dyn CvStore) -> Result<Vec<CvSummary>, AppError> {
    Ok(cvs
        .list_cvs()
        .await?
        .into_iter()
        .map(CvSummary::from)
        .collect())
}

pub async fn get_cv(cvs: &dyn CvStore, id: i64) -> Result<CvDetail, AppError> {
    cvs.find_cv(id)
        .await?
        .map(CvDetail::from)
        .ok_or_else(|| AppError::NotFound(format!("CV {id} not found")))
}

/// `mailto:` link pre-filled with the analysis email draft.
/// `None` for blank addresses or drafts.
pub fn mailto_link(email: &str, job_title: Option<&str>, draft: &str) -> Option<String> {
    let email = email.trim();
    if email.is_empty() || draft.trim().is_empty() {
        return None;
    }

    let subject = match job_title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => format!("Your application: {title}"),
        None => "Your application".to_string(),
    };

    Some(format!(
        "mailto:{}?subject={}&body={}",
        urlencoding::encode(email).replace("%40", "@"),
        urlencoding::encode(&subject),
        urlencoding::encode(draft)
    ))
}
