//! Shared fixtures for unit and router tests.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jsonwebtoken::{encode, EncodingKey, Header};

use crate::auth::{Claims, TokenVerifier};
use crate::llm_client::{LanguageModel, LlmError};
use crate::state::AppState;
use crate::storage::LocalFileStore;
use crate::store::memory::MemoryStore;

pub const TEST_JWT_SECRET: &str = "test-secret";

/// Signs a session token for `user_id` valid for one hour.
pub fn token_for(user_id: i64) -> String {
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

/// Model double that returns a fixed reply and records prompts.
pub struct ScriptedModel {
    reply: Option<String>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl ScriptedModel {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Every call fails as if the API returned no content.
    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        self.reply.clone().ok_or(LlmError::EmptyContent)
    }
}

/// App state over an in-memory store, a scripted model and a local upload dir.
pub fn test_state(store: Arc<MemoryStore>, model: Arc<ScriptedModel>, upload_dir: &Path) -> AppState {
    AppState {
        jobs: store.clone(),
        cvs: store.clone(),
        users: store,
        files: Arc::new(LocalFileStore::new(upload_dir)),
        model,
        tokens: TokenVerifier::new(TEST_JWT_SECRET),
        max_upload_bytes: 1024 * 1024,
    }
}
