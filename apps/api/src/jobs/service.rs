use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::job_post::JobPost;
use crate::store::JobPostStore;

#[derive(Debug, Deserialize)]
pub struct CreateJobPostRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

pub async fn create_job_post(
    jobs: &dyn JobPostStore,
    request: &CreateJobPostRequest,
) -> Result<JobPost, AppError> {
    let title = request.title.as_deref().filter(|t| !t.trim().is_empty());
    let description = request.description.as_deref().filter(|d| !d.trim().is_empty());
    let (Some(title), Some(description)) = (title, description) else {
        return Err(AppError::Validation(
            "title and description are required".to_string(),
        ));
    };

    let job = jobs.insert_job_post(title, description).await?;
    info!("Created job post {} ({})", job.id, job.title);
    Ok(job)
}

/// All postings, newest first.
pub async fn list_job_posts(jobs: &dyn JobPostStore) -> Result<Vec<JobPost>, AppError> {
    jobs.list_job_posts().await
}
