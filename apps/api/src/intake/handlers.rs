//! Axum route handlers for CV intake.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::intake::pipeline::{upload_cv, CvUpload, UploadResult};
use crate::state::AppState;

/// Multipart field carrying the PDF.
const FILE_FIELD: &str = "cv";
const JOB_POST_FIELD: &str = "job_post_id";

/// POST /cv/upload
pub async fn handle_upload(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResult>, AppError> {
    let mut multipart = multipart
        .map_err(|e| AppError::Validation(format!("Expected a multipart/form-data body: {e}")))?;

    let mut upload = CvUpload::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Invalid multipart body", e))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                upload.original_name = field.file_name().map(str::to_owned);
                upload.content_type = field.content_type().map(str::to_owned);
                upload.file = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| multipart_error("Failed to read uploaded file", e))?,
                );
            }
            Some(JOB_POST_FIELD) => {
                upload.job_post_id = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| multipart_error("Failed to read job_post_id", e))?,
                );
            }
            _ => {}
        }
    }

    let result = upload_cv(state.cvs.as_ref(), state.files.as_ref(), user.id, upload).await?;
    Ok(Json(result))
}

/// Body-limit hits become 413; anything else is a malformed request.
fn multipart_error(context: &str, e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Uploaded file is too large.".to_string())
    } else {
        AppError::Validation(format!("{context}: {e}"))
    }
}
