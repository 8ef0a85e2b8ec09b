pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::admin::{handlers as admin, page};
use crate::analysis::handlers as analysis;
use crate::intake::handlers as intake;
use crate::jobs::handlers as jobs;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Job postings
        .route(
            "/job-posts",
            get(jobs::handle_list_job_posts).post(jobs::handle_create_job_post),
        )
        // CV intake
        .route(
            "/cv/upload",
            post(intake::handle_upload).layer(upload_limit),
        )
        // Admin
        .route("/admin", get(page::admin_page))
        .route("/admin/cvs", get(admin::handle_list_cvs))
        .route("/admin/cvs/:id", get(admin::handle_get_cv))
        .route("/admin/pending-users", get(admin::handle_pending_users))
        .route("/admin/approve-user/:id", patch(admin::handle_approve_user))
        .route("/admin/reject-user/:id", patch(admin::handle_reject_user))
        // AI analysis
        .route("/ai/analyze", post(analysis::handle_analyze))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::build_router;
    use crate::models::user::{UserRole, UserStatus};
    use crate::store::memory::MemoryStore;
    use crate::testing::{test_state, token_for, ScriptedModel};

    const VERDICT: &str = r#"{"fit_score": 72, "fit_status": "Strong", "strengths": ["Rust"], "gaps": [], "summary": "Good fit", "email_draft": "Hi Jane"}"#;

    struct Harness {
        store: Arc<MemoryStore>,
        model: Arc<ScriptedModel>,
        admin_token: String,
        candidate_token: String,
        uploads: tempfile::TempDir,
    }

    impl Harness {
        fn new() -> Self {
            let store = Arc::new(MemoryStore::new());
            let admin = store.add_user("Ada Admin", "ada@example.com", UserRole::Admin, UserStatus::Active);
            let candidate = store.add_user("Jane Doe", "jane@example.com", UserRole::Candidate, UserStatus::Active);
            Self {
                store,
                model: Arc::new(ScriptedModel::replying(VERDICT)),
                admin_token: token_for(admin.id),
                candidate_token: token_for(candidate.id),
                uploads: tempfile::tempdir().unwrap(),
            }
        }

        async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
            let state = test_state(self.store.clone(), self.model.clone(), self.uploads.path());
            let response = build_router(state).oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            (status, bytes.to_vec())
        }

        async fn send_json(&self, request: Request<Body>) -> (StatusCode, Value) {
            let (status, bytes) = self.send(request).await;
            (status, serde_json::from_slice(&bytes).unwrap())
        }
    }

    fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    fn multipart_upload(token: &str, file: Option<&[u8]>, job_post_id: Option<&str>) -> Request<Body> {
        const BOUNDARY: &str = "screening-boundary";
        let mut body = Vec::new();
        if let Some(job_post_id) = job_post_id {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"job_post_id\"\r\n\r\n{job_post_id}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some(file) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"cv\"; filename=\"jane.pdf\"\r\nContent-Type: application/pdf\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(file);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method(Method::POST)
            .uri("/cv/upload")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_service() {
        let h = Harness::new();
        let (status, body) = h.send_json(get("/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "screening-api");
    }

    #[tokio::test]
    async fn test_admin_page_is_html() {
        let h = Harness::new();
        let (status, bytes) = h.send(get("/admin", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8(bytes).unwrap().contains("Uploaded CVs"));
    }

    #[tokio::test]
    async fn test_admin_routes_require_token() {
        let h = Harness::new();
        let (status, body) = h.send_json(get("/admin/cvs", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["ok"], false);
    }

    #[tokio::test]
    async fn test_candidate_cannot_use_admin_routes() {
        let h = Harness::new();
        let (status, _) = h
            .send_json(get("/admin/pending-users", Some(&h.candidate_token)))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_pending_user_cannot_upload() {
        let h = Harness::new();
        let pending = h
            .store
            .add_user("Pat Pending", "pat@example.com", UserRole::Candidate, UserStatus::Pending);
        let request = multipart_upload(&token_for(pending.id), Some(b"%PDF-1.4"), None);
        let (status, _) = h.send_json(request).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(h.store.cv_count(), 0);
    }

    #[tokio::test]
    async fn test_create_then_list_job_posts() {
        let h = Harness::new();
        for title in ["Backend Engineer", "Data Analyst"] {
            let (status, body) = h
                .send_json(json_request(
                    Method::POST,
                    "/job-posts",
                    Some(&h.admin_token),
                    json!({ "title": title, "description": "Build things" }),
                ))
                .await;
            assert_eq!(status, StatusCode::CREATED);
            assert_eq!(body["job"]["title"], title);
        }

        let (status, body) = h.send_json(get("/job-posts", None)).await;
        assert_eq!(status, StatusCode::OK);
        let jobs = body["jobs"].as_array().unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0]["title"], "Data Analyst");
    }

    #[tokio::test]
    async fn test_malformed_json_gets_uniform_error() {
        let h = Harness::new();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/job-posts")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", h.admin_token))
            .body(Body::from("{\"title\": "))
            .unwrap();
        let (status, body) = h.send_json(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"], "Invalid JSON");
    }

    #[tokio::test]
    async fn test_upload_without_file_is_rejected() {
        let h = Harness::new();
        let (status, body) = h
            .send_json(multipart_upload(&h.candidate_token, None, Some("1")))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No file uploaded.");
    }

    #[tokio::test]
    async fn test_upload_with_non_numeric_job_post_is_rejected() {
        let h = Harness::new();
        let (status, body) = h
            .send_json(multipart_upload(&h.candidate_token, Some(b"%PDF-1.4"), Some("abc")))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "job_post_id must be a number");
        assert_eq!(h.store.cv_count(), 0);
    }

    #[tokio::test]
    async fn test_oversized_upload_is_413() {
        let h = Harness::new();
        let oversized = vec![b'x'; 1024 * 1024 + 1];
        let (status, body) = h
            .send_json(multipart_upload(&h.candidate_token, Some(&oversized), None))
            .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["code"], "PAYLOAD_TOO_LARGE");
        assert_eq!(h.store.cv_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_records_cv_even_when_text_is_unreadable() {
        let h = Harness::new();
        let (status, body) = h
            .send_json(multipart_upload(&h.candidate_token, Some(b"not really a pdf"), Some("7")))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["jobPostId"], 7);
        assert_eq!(body["originalName"], "jane.pdf");
        assert_eq!(body["textLength"], 0);
        assert_eq!(h.store.cv_count(), 1);

        let (status, body) = h.send_json(get("/admin/cvs", Some(&h.admin_token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cvs"][0]["candidate_email"], "jane@example.com");
    }

    #[tokio::test]
    async fn test_unknown_cv_is_404() {
        let h = Harness::new();
        let (status, body) = h.send_json(get("/admin/cvs/999", Some(&h.admin_token))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "CV 999 not found");
    }

    #[tokio::test]
    async fn test_non_numeric_cv_id_is_400() {
        let h = Harness::new();
        let (status, _) = h.send_json(get("/admin/cvs/abc", Some(&h.admin_token))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_persists_onto_cv() {
        let h = Harness::new();
        let (_, upload) = h
            .send_json(multipart_upload(&h.candidate_token, Some(b"not really a pdf"), None))
            .await;
        let cv_id = upload["uploadId"].as_i64().unwrap();

        let (status, body) = h
            .send_json(json_request(
                Method::POST,
                "/ai/analyze",
                Some(&h.admin_token),
                json!({ "jobDescription": "Rust backend", "cvText": "Jane, Rust dev", "cvId": cv_id }),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["fit_score"], 72);
        assert_eq!(body["persisted"], true);
        assert_eq!(h.store.analysis_of(cv_id).unwrap().score, 72);

        let (_, detail) = h
            .send_json(get(&format!("/admin/cvs/{cv_id}"), Some(&h.admin_token)))
            .await;
        assert_eq!(detail["cv"]["analysis_score"], 72);
        assert_eq!(detail["cv"]["analysis_pros"], json!(["Rust"]));
    }

    #[tokio::test]
    async fn test_analyze_with_missing_input_skips_model() {
        let h = Harness::new();
        let (status, _) = h
            .send_json(json_request(
                Method::POST,
                "/ai/analyze",
                Some(&h.admin_token),
                json!({ "jobDescription": "   ", "cvText": "Jane" }),
            ))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(h.model.calls(), 0);
    }

    #[tokio::test]
    async fn test_approve_and_reject_users() {
        let h = Harness::new();
        let pending = h
            .store
            .add_user("Pat Pending", "pat@example.com", UserRole::Candidate, UserStatus::Pending);

        let (status, body) = h
            .send_json(get("/admin/pending-users", Some(&h.admin_token)))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["users"].as_array().unwrap().len(), 1);

        let approve = Request::builder()
            .method(Method::PATCH)
            .uri(format!("/admin/approve-user/{}", pending.id))
            .header(header::AUTHORIZATION, format!("Bearer {}", h.admin_token))
            .body(Body::empty())
            .unwrap();
        let (status, body) = h.send_json(approve).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["status"], "active");

        let reject = Request::builder()
            .method(Method::PATCH)
            .uri("/admin/reject-user/999")
            .header(header::AUTHORIZATION, format!("Bearer {}", h.admin_token))
            .body(Body::empty())
            .unwrap();
        let (status, body) = h.send_json(reject).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "User 999 not found");
    }
}
