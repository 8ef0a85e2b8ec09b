//! In-memory store used by unit and router tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::AppError;
use crate::models::cv::{AnalysisUpdate, CvRow, InsertedCv, NewCv};
use crate::models::job_post::JobPost;
use crate::models::user::{User, UserRole, UserStatus};
use crate::store::{CvStore, JobPostStore, UserStore};

#[derive(Debug, Clone)]
struct StoredCv {
    id: i64,
    cv: NewCv,
    created_at: DateTime<Utc>,
    analysis: Option<AnalysisUpdate>,
    // Lets tests plant values that were never produced by `record_analysis`.
    raw_pros: Option<String>,
    raw_cons: Option<String>,
}

#[derive(Default)]
struct Tables {
    job_posts: Vec<JobPost>,
    cvs: Vec<StoredCv>,
    users: Vec<User>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, full_name: &str, email: &str, role: UserRole, status: UserStatus) -> User {
        let mut tables = self.tables.lock().unwrap();
        let now = Utc::now();
        let user = User {
            id: tables.next_id(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            role,
            status,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        user
    }

    pub fn add_job_post_at(&self, title: &str, description: &str, created_at: DateTime<Utc>) -> JobPost {
        let mut tables = self.tables.lock().unwrap();
        let job = JobPost {
            id: tables.next_id(),
            title: title.to_string(),
            description: description.to_string(),
            created_at,
        };
        tables.job_posts.push(job.clone());
        job
    }

    pub fn add_cv_at(&self, cv: NewCv, created_at: DateTime<Utc>) -> i64 {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        tables.cvs.push(StoredCv {
            id,
            cv,
            created_at,
            analysis: None,
            raw_pros: None,
            raw_cons: None,
        });
        id
    }

    /// Overwrites the stored pros/cons text verbatim, bypassing serialization.
    pub fn set_raw_pros_cons(&self, id: i64, pros: Option<&str>, cons: Option<&str>) {
        let mut tables = self.tables.lock().unwrap();
        if let Some(stored) = tables.cvs.iter_mut().find(|c| c.id == id) {
            stored.raw_pros = pros.map(String::from);
            stored.raw_cons = cons.map(String::from);
        }
    }

    pub fn cv_count(&self) -> usize {
        self.tables.lock().unwrap().cvs.len()
    }

    pub fn analysis_of(&self, id: i64) -> Option<AnalysisUpdate> {
        let tables = self.tables.lock().unwrap();
        tables
            .cvs
            .iter()
            .find(|c| c.id == id)
            .and_then(|c| c.analysis.clone())
    }

    fn to_row(tables: &Tables, stored: &StoredCv) -> CvRow {
        let user = tables.users.iter().find(|u| u.id == stored.cv.user_id);
        let job = stored
            .cv
            .job_post_id
            .and_then(|id| tables.job_posts.iter().find(|j| j.id == id));
        let analysis = stored.analysis.as_ref();

        CvRow {
            cv_id: stored.id,
            user_id: stored.cv.user_id,
            candidate_name: user.map(|u| u.full_name.clone()),
            candidate_email: user.map(|u| u.email.clone()),
            job_post_id: stored.cv.job_post_id,
            job_title: job.map(|j| j.title.clone()),
            job_description: job.map(|j| j.description.clone()),
            file_name: stored.cv.file_name.clone(),
            original_name: stored.cv.original_name.clone(),
            file_path: stored.cv.file_path.clone(),
            raw_text: stored.cv.raw_text.clone(),
            created_at: stored.created_at,
            analysis_score: analysis.map(|a| a.score),
            analysis_notes: analysis.map(|a| a.notes.clone()),
            analysis_pros: stored
                .raw_pros
                .clone()
                .or_else(|| analysis.map(|a| a.pros_json.clone())),
            analysis_cons: stored
                .raw_cons
                .clone()
                .or_else(|| analysis.map(|a| a.cons_json.clone())),
            analysis_email_draft: analysis.map(|a| a.email_draft.clone()),
        }
    }
}

#[async_trait]
impl JobPostStore for MemoryStore {
    async fn insert_job_post(&self, title: &str, description: &str) -> Result<JobPost, AppError> {
        Ok(self.add_job_post_at(title, description, Utc::now()))
    }

    async fn list_job_posts(&self) -> Result<Vec<JobPost>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut jobs = tables.job_posts.clone();
        jobs.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(jobs)
    }
}

#[async_trait]
impl CvStore for MemoryStore {
    async fn insert_cv(&self, cv: NewCv) -> Result<InsertedCv, AppError> {
        let job_post_id = cv.job_post_id;
        let created_at = Utc::now();
        let id = self.add_cv_at(cv, created_at);
        Ok(InsertedCv {
            id,
            job_post_id,
            created_at,
        })
    }

    async fn list_cvs(&self) -> Result<Vec<CvRow>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<CvRow> = tables
            .cvs
            .iter()
            .map(|stored| Self::to_row(&tables, stored))
            .collect();
        rows.sort_by(|a, b| (b.created_at, b.cv_id).cmp(&(a.created_at, a.cv_id)));
        Ok(rows)
    }

    async fn find_cv(&self, id: i64) -> Result<Option<CvRow>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .cvs
            .iter()
            .find(|c| c.id == id)
            .map(|stored| Self::to_row(&tables, stored)))
    }

    async fn record_analysis(&self, id: i64, update: &AnalysisUpdate) -> Result<u64, AppError> {
        let mut tables = self.tables.lock().unwrap();
        match tables.cvs.iter_mut().find(|c| c.id == id) {
            Some(stored) => {
                stored.analysis = Some(update.clone());
                stored.raw_pros = None;
                stored.raw_cons = None;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user(&self, id: i64) -> Result<Option<User>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn list_pending_users(&self) -> Result<Vec<User>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut users: Vec<User> = tables
            .users
            .iter()
            .filter(|u| u.status == UserStatus::Pending)
            .cloned()
            .collect();
        users.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(users)
    }

    async fn set_user_status(&self, id: i64, status: UserStatus) -> Result<Option<User>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.users.iter_mut().find(|u| u.id == id).map(|user| {
            user.status = status;
            user.updated_at = Utc::now();
            user.clone()
        }))
    }
}
