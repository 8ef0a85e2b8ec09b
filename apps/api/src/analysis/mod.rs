// AI analysis: scores a CV against a job description through the language
// model and stores the verdict on the CV row.

pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod result;
