pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::limit::GlobalConcurrencyLimitLayer;

use crate::document::handlers as document;
use crate::guidance::handlers as guidance;
use crate::state::AppState;

/// Builds the API router. Actions run one at a time: the concurrency limit is
/// shared by every action route, so a second action waits until the first
/// finishes. `/health` is added after the limit and never queues.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        // Career guidance
        .route("/api/v1/career/domain", post(guidance::handle_domain))
        .route("/api/v1/career/resources", post(guidance::handle_resources))
        .route(
            "/api/v1/career/recommendation",
            post(guidance::handle_recommendation),
        )
        .route("/api/v1/career/job-guide", post(guidance::handle_job_guide))
        .route("/api/v1/career/skill-gap", post(guidance::handle_skill_gap))
        // Résumé optimization
        .route("/api/v1/resume/optimize", post(document::handle_optimize))
        .route(
            "/api/v1/resume/optimize/pdf",
            post(document::handle_optimize_pdf),
        )
        // Rendering
        .route("/api/v1/render/text", post(document::handle_render_text))
        .route("/api/v1/render/resume", post(document::handle_render_resume))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(GlobalConcurrencyLimitLayer::new(1))
        .route("/health", get(health::health_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::document::extract::EMPTY_INPUT_SENTINEL;
    use crate::document::layout::PageGeometry;
    use crate::guidance::advisor::tests::{settings, ScriptedClient};
    use crate::guidance::advisor::CareerAdvisor;
    use crate::llm_client::{
        CompletionClient, CompletionRequest, CompletionResult, GroqClient, LlmError,
    };
    use async_trait::async_trait;
    use tokio::sync::Notify;

    const BOUNDARY: &str = "careerapiboundary";

    /// Sleeps on every call and records how many calls overlapped.
    struct SlowClient {
        delay: Duration,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        started: Notify,
    }

    impl SlowClient {
        fn new(delay: Duration) -> Self {
            Self {
                delay,
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
                started: Notify::new(),
            }
        }
    }

    #[async_trait]
    impl CompletionClient for SlowClient {
        async fn complete(
            &self,
            _request: &CompletionRequest,
        ) -> Result<CompletionResult, LlmError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            self.started.notify_one();
            tokio::time::sleep(self.delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(CompletionResult {
                raw_text: "Data Analytics".to_string(),
            })
        }
    }

    fn domain_request() -> Request<Body> {
        json_request(
            "/api/v1/career/domain",
            json!({"skills": "Python", "interests": "Data"}),
        )
    }

    fn test_config() -> Config {
        Config::from_lookup(|_| None).unwrap()
    }

    fn app_with(client: Arc<dyn CompletionClient>) -> Router {
        build_router(AppState {
            advisor: CareerAdvisor::new(client, settings()),
            config: test_config(),
            page_geometry: PageGeometry::default(),
        })
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(uri: &str, job_description: &str, resume: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"job_description\"\r\n\r\n{job_description}\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"resume.pdf\"\r\nContent-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(resume);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = app_with(Arc::new(ScriptedClient::new("unused")));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_domain_recommendation() {
        let client = Arc::new(ScriptedClient::new("Data Analytics"));
        let app = app_with(client.clone());

        let response = app
            .oneshot(json_request(
                "/api/v1/career/domain",
                json!({"skills": "Python, SQL", "interests": "Data Science"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"domain": "Data Analytics"}));
        assert_eq!(client.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_input_is_rejected_before_completion() {
        let client = Arc::new(ScriptedClient::new("unused"));
        let app = app_with(client.clone());

        let response = app
            .oneshot(json_request(
                "/api/v1/career/domain",
                json!({"skills": "Python", "interests": " , "}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
        assert!(client.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_missing_credential_returns_plain_message() {
        let groq = GroqClient::new(None, "http://127.0.0.1:9/v1", Duration::from_millis(50))
            .unwrap();
        let app = app_with(Arc::new(groq));

        let response = app
            .oneshot(json_request(
                "/api/v1/career/domain",
                json!({"skills": ["Python"], "interests": ["Data"]}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "MISSING_CREDENTIAL");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("GROQ_API_KEY"));
    }

    #[tokio::test]
    async fn test_recommendation_flow_makes_two_calls() {
        let client = Arc::new(ScriptedClient::new(
            "Python Basics - http://example.com/py\nSQL Crash Course",
        ));
        let app = app_with(client.clone());

        let response = app
            .oneshot(json_request(
                "/api/v1/career/recommendation",
                json!({"skills": "Python", "interests": "Data"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["resources"].as_array().unwrap().len(), 2);
        assert_eq!(
            body["resources"][1]["link"],
            "https://www.youtube.com/results?search_query=SQL+Crash+Course"
        );
        let prompts = client.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[1].contains("career domain: Python Basics"));
    }

    #[tokio::test]
    async fn test_skill_gap_requires_current_skills() {
        let app = app_with(Arc::new(ScriptedClient::new("unused")));
        let response = app
            .oneshot(json_request(
                "/api/v1/career/skill-gap",
                json!({"target_job": "Data Scientist"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_job_guide() {
        let app = app_with(Arc::new(ScriptedClient::new("1. Learn SQL")));
        let response = app
            .oneshot(json_request(
                "/api/v1/career/job-guide",
                json!({"job_title": "Data Analyst"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"job_title": "Data Analyst", "guide": "1. Learn SQL"})
        );
    }

    #[tokio::test]
    async fn test_optimize_with_empty_upload_uses_sentinel() {
        let client = Arc::new(ScriptedClient::new("Optimized resume"));
        let app = app_with(client.clone());

        let response = app
            .oneshot(multipart_request("/api/v1/resume/optimize", "Rust engineer", b""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["optimized_resume"], "Optimized resume");
        assert!(client.prompts()[0].ends_with(EMPTY_INPUT_SENTINEL));
    }

    #[tokio::test]
    async fn test_optimize_pdf_is_a_download() {
        let app = app_with(Arc::new(ScriptedClient::new("Jane Doe\nRust Engineer")));

        let response = app
            .oneshot(multipart_request(
                "/api/v1/resume/optimize/pdf",
                "Rust engineer",
                b"not a pdf",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"optimized_resume.pdf\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_optimize_requires_job_description() {
        let client = Arc::new(ScriptedClient::new("unused"));
        let app = app_with(client.clone());
        let response = app
            .oneshot(multipart_request("/api/v1/resume/optimize", " ", b"%PDF-1.5"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(client.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_render_resume() {
        let app = app_with(Arc::new(ScriptedClient::new("unused")));
        let response = app
            .oneshot(json_request(
                "/api/v1/render/resume",
                json!({"name": "Jane Doe", "skills": ["SQL"], "projects": ["Churn model"]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    }

    #[tokio::test]
    async fn test_render_text_requires_content() {
        let app = app_with(Arc::new(ScriptedClient::new("unused")));
        let response = app
            .oneshot(json_request("/api/v1/render/text", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_concurrent_actions_run_one_at_a_time() {
        let client = Arc::new(SlowClient::new(Duration::from_millis(100)));
        let app = app_with(client.clone());

        let (first, second) = tokio::join!(
            app.clone().oneshot(domain_request()),
            app.oneshot(domain_request())
        );

        assert_eq!(first.unwrap().status(), StatusCode::OK);
        assert_eq!(second.unwrap().status(), StatusCode::OK);
        assert_eq!(client.peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_health_does_not_wait_for_an_action() {
        let client = Arc::new(SlowClient::new(Duration::from_millis(500)));
        let app = app_with(client.clone());

        let health = async {
            client.started.notified().await;
            let response = app
                .clone()
                .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
                .await
                .unwrap();
            (response.status(), client.in_flight.load(Ordering::SeqCst))
        };
        let (action, (health_status, in_flight)) =
            tokio::join!(app.clone().oneshot(domain_request()), health);

        assert_eq!(health_status, StatusCode::OK);
        assert_eq!(in_flight, 1, "health answered only after the action finished");
        assert_eq!(action.unwrap().status(), StatusCode::OK);
    }
}
