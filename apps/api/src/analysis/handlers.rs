//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::analysis::orchestrator::{analyze_cv, AnalyzeRequest};
use crate::analysis::result::AnalysisResult;
use crate::auth::AdminUser;
use crate::extract::ApiJson;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub data: AnalysisResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persisted: Option<bool>,
}

/// POST /ai/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiJson(request): ApiJson<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let outcome = analyze_cv(state.model.as_ref(), state.cvs.as_ref(), &request).await?;

    Ok(Json(AnalyzeResponse {
        success: true,
        data: outcome.result,
        persisted: outcome.persisted,
    }))
}
