//! AI Analysis Orchestrator: prompt → model → parse → (optional) persist.
//!
//! One sequential pass. A model failure or unparsable output is returned to
//! the caller as-is; nothing is retried.

use serde::Deserialize;
use tracing::{info, warn};

use crate::analysis::prompts::{analysis_system, build_analysis_prompt};
use crate::analysis::result::AnalysisResult;
use crate::errors::AppError;
use crate::llm_client::LanguageModel;
use crate::store::CvStore;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub job_description: Option<String>,
    pub cv_text: Option<String>,
    pub cv_id: Option<i64>,
}

#[derive(Debug)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    /// `None` when no `cvId` was given; otherwise whether a row was updated.
    pub persisted: Option<bool>,
}

pub async fn analyze_cv(
    model: &dyn LanguageModel,
    cvs: &dyn CvStore,
    request: &AnalyzeRequest,
) -> Result<AnalysisOutcome, AppError> {
    let job_description = non_empty(request.job_description.as_deref());
    let cv_text = non_empty(request.cv_text.as_deref());
    let (Some(job_description), Some(cv_text)) = (job_description, cv_text) else {
        return Err(AppError::Validation(
            "jobDescription and cvText are required".to_string(),
        ));
    };

    let prompt = build_analysis_prompt(job_description, cv_text);
    let raw = model
        .generate(&prompt, &analysis_system())
        .await
        .map_err(|e| AppError::Llm(format!("CV analysis call failed: {e}")))?;

    let result = AnalysisResult::from_model_output(&raw)?;

    let persisted = match request.cv_id {
        Some(cv_id) => {
            let rows = cvs.record_analysis(cv_id, &result.to_update()).await?;
            if rows == 0 {
                warn!("Analysis for CV {cv_id} not saved: no such CV");
            } else {
                info!("Saved analysis for CV {cv_id} (score {})", result.fit_score);
            }
            Some(rows > 0)
        }
        None => None,
    };

    Ok(AnalysisOutcome { result, persisted })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
