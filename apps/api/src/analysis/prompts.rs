// LLM prompt templates for CV analysis.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// Persona for the screening call; the JSON-only rules are appended.
const ANALYSIS_PERSONA: &str = "You are an experienced HR specialist who screens \
    candidate CVs against open positions. Be fair, concrete and concise.";

pub fn analysis_system() -> String {
    format!("{ANALYSIS_PERSONA} {JSON_ONLY_SYSTEM}")
}

/// Builds the scoring prompt. Both texts are embedded verbatim.
pub fn build_analysis_prompt(job_description: &str, cv_text: &str) -> String {
    format!(
        r#"TASK: Evaluate the CANDIDATE PROFILE below for the TARGET POSITION.

--- TARGET POSITION / JOB POSTING ---
"{job_description}"

--- CANDIDATE CV TEXT ---
"{cv_text}"

SCORING RUBRIC (fit_score is an integer from 0 to 100):
- 0-30: Irrelevant
- 31-50: Weak
- 51-70: Medium
- 71-85: Strong
- 86-100: Excellent

OUTPUT FORMAT (return ONLY this JSON object):
{{
  "fit_score": 0,
  "fit_status": "Irrelevant | Weak | Medium | Strong | Excellent",
  "strengths": ["positive point", "..."],
  "gaps": ["missing skill or weakness", "..."],
  "summary": "two or three sentence summary of the fit",
  "email_draft": "A polite, professional e-mail to the candidate that reflects this evaluation."
}}

RULES:
1. fit_status MUST match the rubric band of fit_score.
2. strengths and gaps are short bullet-style strings; use [] when there are none.
3. Return ONLY the JSON object. No prose, no code fences."#
    )
}
