use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::llm_client::LanguageModel;
use crate::storage::FileStore;
use crate::store::{CvStore, JobPostStore, UserStore};

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Every handle is constructed once in `main` and cloned (cheaply) per request.
#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<dyn JobPostStore>,
    pub cvs: Arc<dyn CvStore>,
    pub users: Arc<dyn UserStore>,
    /// Destination for uploaded CV files (local directory or S3 bucket).
    pub files: Arc<dyn FileStore>,
    pub model: Arc<dyn LanguageModel>,
    pub tokens: TokenVerifier,
    pub max_upload_bytes: usize,
}
