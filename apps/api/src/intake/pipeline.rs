//! CV Intake Pipeline.
//!
//! Validates the upload, stores the file, extracts text and records one
//! `uploaded_cvs` row. The job posting id is only checked for being numeric;
//! it is not looked up.

use std::path::Path;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::intake::pdf::extract_pdf_text;
use crate::models::cv::NewCv;
use crate::storage::FileStore;
use crate::store::CvStore;
use crate::text::char_prefix;

/// Characters of extracted text echoed back to the uploader.
pub const UPLOAD_PREVIEW_CHARS: usize = 300;

const DEFAULT_CONTENT_TYPE: &str = "application/pdf";

/// The raw multipart inputs of one upload.
#[derive(Debug, Default)]
pub struct CvUpload {
    pub file: Option<Bytes>,
    pub original_name: Option<String>,
    pub content_type: Option<String>,
    pub job_post_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub ok: bool,
    pub upload_id: i64,
    pub job_post_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub file_name: String,
    pub original_name: String,
    pub text_length: usize,
    pub text_preview: String,
}

pub async fn upload_cv(
    cvs: &dyn CvStore,
    files: &dyn FileStore,
    user_id: i64,
    upload: CvUpload,
) -> Result<UploadResult, AppError> {
    let file = upload
        .file
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| AppError::Validation("No file uploaded.".to_string()))?;
    let job_post_id = parse_job_post_id(upload.job_post_id.as_deref())?;

    let original_name = upload
        .original_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "cv.pdf".to_string());
    let file_name = stored_file_name(&original_name);
    let content_type = upload
        .content_type
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

    let file_path = files.put(&file_name, &content_type, file.clone()).await?;
    let raw_text = extract_pdf_text(file).await;

    let text_length = raw_text.chars().count();
    let text_preview = char_prefix(&raw_text, UPLOAD_PREVIEW_CHARS).to_string();

    let inserted = match cvs
        .insert_cv(NewCv {
            user_id,
            job_post_id,
            file_name: file_name.clone(),
            original_name: original_name.clone(),
            file_path: file_path.clone(),
            raw_text,
        })
        .await
    {
        Ok(inserted) => inserted,
        Err(e) => {
            // No row will reference the stored file.
            if let Err(cleanup) = files.remove(&file_name).await {
                warn!("Orphaned upload left at {file_path}: {cleanup}");
            }
            return Err(e);
        }
    };

    info!(
        "Stored CV {} for user {user_id} ({text_length} chars extracted)",
        inserted.id
    );

    Ok(UploadResult {
        ok: true,
        upload_id: inserted.id,
        job_post_id: inserted.job_post_id,
        created_at: inserted.created_at,
        file_name,
        original_name,
        text_length,
        text_preview,
    })
}

/// Absent or blank means "not linked to a posting".
pub fn parse_job_post_id(raw: Option<&str>) -> Result<Option<i64>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| AppError::Validation("job_post_id must be a number".to_string())),
    }
}

/// `<uuid>.<ext>`, keeping the (sanitized, lowercased) extension of the client name.
fn stored_file_name(original_name: &str) -> String {
    let sanitized = sanitize_filename::sanitize(original_name);
    let extension = Path::new(&sanitized)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| ext.to_ascii_lowercase());

    match extension {
        Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
        None => Uuid::new_v4().to_string(),
    }
}
