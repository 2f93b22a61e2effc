pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Single-page UI
        .route("/", get(handlers::handle_index))
        .route("/analyze", post(handlers::handle_analyze_page))
        // JSON API
        .route("/api/v1/analyze", post(handlers::handle_analyze_api))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::extract::fixtures::pdf_with_pages;
    use crate::llm_client::MODEL;
    use crate::presentation::{
        EXTRACTION_FAILED_MESSAGE, MISSING_INPUT_MESSAGE, MODEL_FAILED_MESSAGE,
        UPLOAD_FAILED_MESSAGE,
    };
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const BOUNDARY: &str = "prep-pulse-test-boundary";
    const RESUME: &str = "Python, SQL, 2 years experience";
    const JD: &str = "Looking for Senior Python Engineer, 5 years, AWS, Kubernetes";

    fn test_state(api_base: String) -> AppState {
        test_state_with_limit(api_base, 1024 * 1024)
    }

    fn test_state_with_limit(api_base: String, max_upload_bytes: usize) -> AppState {
        AppState::new(Config {
            google_api_key: "test-key".to_string(),
            gemini_api_base: api_base,
            port: 0,
            max_upload_bytes,
            rust_log: "debug".to_string(),
        })
    }

    /// Hand-built multipart body. `resume` is `(filename, bytes)`.
    fn multipart_body(resume: Option<(&str, &[u8])>, job_description: Option<&str>) -> Vec<u8> {
        let mut body = Vec::new();
        if let Some((filename, bytes)) = resume {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        if let Some(text) = job_description {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"job_description\"\r\n\r\n{text}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn post_multipart(uri: &str, body: Vec<u8>) -> Request<Body> {
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

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn mount_unused_gemini(server: &MockServer) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(server)
            .await;
    }

    fn generate_path() -> String {
        format!("/models/{MODEL}:generateContent")
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state("http://127.0.0.1:9".to_string()));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "prep-pulse");
    }

    #[tokio::test]
    async fn test_index_renders_idle_page() {
        let app = build_router(test_state("http://127.0.0.1:9".to_string()));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let page = body_text(response).await;
        assert!(page.contains("Analyze Readiness"));
        assert!(!page.contains("Analysis Complete!"));
    }

    #[tokio::test]
    async fn test_missing_document_shows_warning_without_model_call() {
        let server = MockServer::start().await;
        mount_unused_gemini(&server).await;
        let app = build_router(test_state(server.uri()));

        let body = multipart_body(None, Some("Backend Engineer, Python, AWS"));
        let response = app.oneshot(post_multipart("/analyze", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let page = body_text(response).await;
        assert!(page.contains(MISSING_INPUT_MESSAGE));
        assert!(page.contains("Backend Engineer, Python, AWS"));
    }

    #[tokio::test]
    async fn test_unselected_file_input_counts_as_missing() {
        let server = MockServer::start().await;
        mount_unused_gemini(&server).await;
        let app = build_router(test_state(server.uri()));

        let body = multipart_body(Some(("", &[][..])), Some(JD));
        let response = app.oneshot(post_multipart("/analyze", body)).await.unwrap();

        assert!(body_text(response).await.contains(MISSING_INPUT_MESSAGE));
    }

    #[tokio::test]
    async fn test_oversized_upload_renders_error_page() {
        let server = MockServer::start().await;
        mount_unused_gemini(&server).await;
        let app = build_router(test_state_with_limit(server.uri(), 1024));

        let oversized = vec![b'x'; 8 * 1024];
        let body = multipart_body(Some(("resume.pdf", oversized.as_slice())), Some(JD));
        let response = app.oneshot(post_multipart("/analyze", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        let page = body_text(response).await;
        assert!(page.contains(UPLOAD_FAILED_MESSAGE));
        assert!(page.contains(r#"name="resume""#));
    }

    #[tokio::test]
    async fn test_oversized_upload_on_api_is_validation_error() {
        let server = MockServer::start().await;
        mount_unused_gemini(&server).await;
        let app = build_router(test_state_with_limit(server.uri(), 1024));

        let oversized = vec![b'x'; 8 * 1024];
        let body = multipart_body(Some(("resume.pdf", oversized.as_slice())), Some(JD));
        let response = app
            .oneshot(post_multipart("/api/v1/analyze", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_successful_analysis_renders_result_page() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(generate_path()))
            .and(body_string_contains(RESUME))
            .and(body_string_contains(JD))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"role": "model", "parts": [{
                    "text": "1. **Readiness Score**: 55\n2. **Readiness Level**: Intermediate"
                }]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        let app = build_router(test_state(server.uri()));

        let pdf = pdf_with_pages(&[RESUME]);
        let body = multipart_body(Some(("resume.pdf", pdf.as_slice())), Some(JD));
        let response = app.oneshot(post_multipart("/analyze", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let page = body_text(response).await;
        assert!(page.contains("Analysis Complete!"));
        assert!(page.contains("<strong>Readiness Score</strong>: 55"));
        assert!(page.contains("How was this calculated? (Scoring Logic)"));
        assert!(page.contains("Keyword Matching"));
    }

    #[tokio::test]
    async fn test_zero_page_pdf_shows_extraction_error() {
        let server = MockServer::start().await;
        mount_unused_gemini(&server).await;
        let app = build_router(test_state(server.uri()));

        let pdf = pdf_with_pages(&[]);
        let body = multipart_body(Some(("empty.pdf", pdf.as_slice())), Some(JD));
        let response = app.oneshot(post_multipart("/analyze", body)).await.unwrap();

        let page = body_text(response).await;
        assert!(page.contains(EXTRACTION_FAILED_MESSAGE));
        assert!(!page.contains("Analysis Complete!"));
    }

    #[tokio::test]
    async fn test_invalid_credential_shows_generic_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(generate_path()))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"code": 401, "message": "API key not valid.", "status": "UNAUTHENTICATED"}
            })))
            .expect(1)
            .mount(&server)
            .await;
        let app = build_router(test_state(server.uri()));

        let pdf = pdf_with_pages(&[RESUME]);
        let body = multipart_body(Some(("resume.pdf", pdf.as_slice())), Some(JD));
        let response = app.oneshot(post_multipart("/analyze", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let page = body_text(response).await;
        assert!(page.contains(MODEL_FAILED_MESSAGE));
        assert!(!page.contains("API key not valid."));
    }

    #[tokio::test]
    async fn test_api_returns_analysis_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(generate_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "6. **Estimated Timeline**: 4 weeks"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        let app = build_router(test_state(server.uri()));

        let pdf = pdf_with_pages(&[RESUME]);
        let body = multipart_body(Some(("resume.pdf", pdf.as_slice())), Some(JD));
        let response = app
            .oneshot(post_multipart("/api/v1/analyze", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["analysis"], "6. **Estimated Timeline**: 4 weeks");
        assert_eq!(body["model"], MODEL);
        assert_eq!(body["scoring_logic"].as_array().unwrap().len(), 4);
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_api_error_statuses() {
        let server = MockServer::start().await;
        mount_unused_gemini(&server).await;
        let app = build_router(test_state(server.uri()));

        let missing = app
            .clone()
            .oneshot(post_multipart("/api/v1/analyze", multipart_body(None, Some(JD))))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_str(&body_text(missing).await).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let corrupt = app
            .oneshot(post_multipart(
                "/api/v1/analyze",
                multipart_body(Some(("resume.pdf", b"not a pdf at all".as_slice())), Some(JD)),
            ))
            .await
            .unwrap();
        assert_eq!(corrupt.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = serde_json::from_str(&body_text(corrupt).await).unwrap();
        assert_eq!(body["error"]["message"], EXTRACTION_FAILED_MESSAGE);
    }
}
