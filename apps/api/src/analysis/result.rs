//! Structured outcome of one scoring call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::llm_client::parse_json_output;
use crate::models::cv::{encode_points, AnalysisUpdate};

/// Rubric band for a fit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitBand {
    Irrelevant, // 0–30
    Weak,       // 31–50
    Medium,     // 51–70
    Strong,     // 71–85
    Excellent,  // 86–100
}

impl FitBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=30 => FitBand::Irrelevant,
            31..=50 => FitBand::Weak,
            51..=70 => FitBand::Medium,
            71..=85 => FitBand::Strong,
            _ => FitBand::Excellent,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FitBand::Irrelevant => "Irrelevant",
            FitBand::Weak => "Weak",
            FitBand::Medium => "Medium",
            FitBand::Strong => "Strong",
            FitBand::Excellent => "Excellent",
        }
    }
}

/// What the model is asked to return. Everything except the score is optional;
/// `null` is read the same as a missing field.
#[derive(Debug, Deserialize)]
struct ModelVerdict {
    fit_score: Value,
    #[serde(default)]
    fit_status: Option<String>,
    #[serde(default)]
    strengths: Option<Vec<String>>,
    #[serde(default)]
    gaps: Option<Vec<String>>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    email_draft: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub fit_score: u8,
    pub fit_status: FitBand,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub summary: String,
    pub email_draft: String,
}

impl AnalysisResult {
    /// Parses raw model text (optionally fenced) into a result.
    ///
    /// The score is rounded and clamped to 0–100 and the status is always the
    /// band of that score, whatever label the model chose.
    pub fn from_model_output(text: &str) -> Result<Self, AppError> {
        let verdict: ModelVerdict = parse_json_output(text)
            .map_err(|e| AppError::Analysis(format!("bad model output: {e}")))?;

        let fit_score = score_from_value(&verdict.fit_score).ok_or_else(|| {
            AppError::Analysis(format!(
                "bad model output: fit_score is not a number ({})",
                verdict.fit_score
            ))
        })?;
        let fit_status = FitBand::from_score(fit_score);

        if let Some(label) = verdict.fit_status.as_deref() {
            if !label.trim().eq_ignore_ascii_case(fit_status.label()) {
                tracing::warn!(
                    "Model labelled score {fit_score} as '{label}', using '{}'",
                    fit_status.label()
                );
            }
        }

        Ok(Self {
            fit_score,
            fit_status,
            strengths: verdict.strengths.unwrap_or_default(),
            gaps: verdict.gaps.unwrap_or_default(),
            summary: verdict.summary.unwrap_or_default(),
            email_draft: verdict.email_draft.unwrap_or_default(),
        })
    }

    /// Column values for the single analysis UPDATE.
    pub fn to_update(&self) -> AnalysisUpdate {
        AnalysisUpdate {
            score: i32::from(self.fit_score),
            notes: self.summary.clone(),
            pros_json: encode_points(&self.strengths),
            cons_json: encode_points(&self.gaps),
            email_draft: self.email_draft.clone(),
        }
    }
}

fn score_from_value(value: &Value) -> Option<u8> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !raw.is_finite() {
        return None;
    }
    Some(raw.round().clamp(0.0, 100.0) as u8)
}
