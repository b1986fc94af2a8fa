pub mod health;

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::analysis::handlers as analysis;
use crate::career::handlers as career;
use crate::state::AppState;

/// Room for multipart boundaries and the text fields next to the file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// GET /api/v1/job-roles
async fn job_roles_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "job_roles": state.dataset.job_roles() }))
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/job-roles", get(job_roles_handler))
        // Analysis API
        .route("/api/v1/analyze", post(analysis::handle_analyze))
        .route("/api/v1/analyze/text", post(analysis::handle_analyze_text))
        // Career API
        .route("/api/v1/roadmap", post(career::handle_roadmap))
        .route("/api/v1/suggestions", post(career::handle_suggestions))
        .route(
            "/api/v1/suggestions/upload",
            post(career::handle_suggestions_upload),
        )
        .route(
            "/api/v1/suggestions/from-analysis",
            post(career::handle_suggestions_from_analysis),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::dataset::{DatasetIndex, JobRecord};
    use crate::llm_client::scripted::ScriptedGateway;

    const BOUNDARY: &str = "careerlens-test-boundary";

    fn config() -> Config {
        Config {
            gemini_api_key: "test-key".to_string(),
            gemini_model: "gemini-2.5-pro".to_string(),
            gemini_endpoint: "http://localhost".to_string(),
            dataset_path: PathBuf::from("unused.csv"),
            llm_timeout: Duration::from_secs(5),
            shortlist_size: 10,
            max_upload_bytes: 1024,
            port: 0,
            rust_log: "info".to_string(),
        }
    }

    fn router(gateway: ScriptedGateway) -> Router {
        let dataset = DatasetIndex::from_records(vec![
            JobRecord {
                job_role: "Data Analyst".to_string(),
                reference_skills: "SQL, Excel".to_string(),
            },
            JobRecord {
                job_role: "Data Analyst".to_string(),
                reference_skills: "SQL, Tableau".to_string(),
            },
            JobRecord {
                job_role: "Backend Developer".to_string(),
                reference_skills: "Rust, SQL".to_string(),
            },
        ]);
        build_router(AppState {
            dataset: Arc::new(dataset),
            gateway: Arc::new(gateway),
            config: config(),
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

    fn multipart_request(uri: &str, fields: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        let mut body = Vec::new();
        for (name, filename, content) in fields {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match filename {
                Some(filename) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                ),
            }
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

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

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(router(ScriptedGateway::new()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["dataset_records"], 3);
    }

    #[tokio::test]
    async fn test_job_roles_are_unique() {
        let request = Request::builder()
            .uri("/api/v1/job-roles")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(router(ScriptedGateway::new()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"job_roles": ["Data Analyst", "Backend Developer"]}));
    }

    #[tokio::test]
    async fn test_roadmap() {
        let gateway = ScriptedGateway::new()
            .reply("career roadmap", "Analyst (0-2 years) | Senior Analyst (2+ years)");
        let request = json_request("/api/v1/roadmap", json!({"current_job": " Analyst "}));
        let (status, body) = send(router(gateway), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["current_job"], "Analyst");
        assert_eq!(body["roadmap"][1]["job"], "Senior Analyst");
        assert_eq!(body["roadmap"][1]["duration"], "2+ years");
    }

    #[tokio::test]
    async fn test_blank_current_job_is_rejected() {
        let request = json_request("/api/v1/roadmap", json!({"current_job": "   "}));
        let (status, body) = send(router(ScriptedGateway::new()), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_suggestions_survive_dataset_pipeline_failure() {
        let gateway = ScriptedGateway::new()
            .fail("comma-separated", 500)
            .reply(
                "alternative career paths",
                "Data Engineer\nBuilds pipelines.\nFit: SQL.\n\n\
                 Product Analyst\nMeasures features.\nFit: Excel.",
            );
        let request = json_request("/api/v1/suggestions", json!({"resume_text": "Jane"}));
        let (status, body) = send(router(gateway), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["dataset_recommendations"], json!([]));
        assert_eq!(body["general_suggestions"].as_array().unwrap().len(), 2);
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_suggestions_from_empty_analysis() {
        let request = json_request(
            "/api/v1/suggestions/from-analysis",
            json!({"analysis_data": {}}),
        );
        let (status, body) = send(router(ScriptedGateway::new()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"suggestions": []}));
    }

    #[tokio::test]
    async fn test_suggestions_from_raw_analysis_with_object_items() {
        let gateway = ScriptedGateway::new().reply(
            "alternative career paths",
            "Data Engineer\nBuilds pipelines.\nFit: SQL.",
        );
        let request = json_request(
            "/api/v1/suggestions/from-analysis",
            json!({"analysis_data": {"summary": {
                "skills": ["SQL"],
                "experience": [{"title": "Analyst", "company": "Acme"}]
            }}}),
        );
        let (status, body) = send(router(gateway), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["suggestions"][0]["title"], "Data Engineer");
    }

    #[tokio::test]
    async fn test_suggestions_from_non_object_analysis() {
        let request = json_request(
            "/api/v1/suggestions/from-analysis",
            json!({"analysis_data": "not an object"}),
        );
        let (status, body) = send(router(ScriptedGateway::new()), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"suggestions": []}));
    }

    #[tokio::test]
    async fn test_analyze_text() {
        let gateway = ScriptedGateway::new().reply(
            "Data Analyst",
            "```json\n{\"analysis\": {\"matched_skills\": [\"SQL\"], \"missing_skills\": [\"Excel\"]}}\n```",
        );
        let request = json_request(
            "/api/v1/analyze/text",
            json!({"job_role": "Data Analyst", "resume_text": "SQL reports"}),
        );
        let (status, body) = send(router(gateway), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 50.0);
        assert_eq!(body["missing_skills"], json!(["Excel"]));
    }

    #[tokio::test]
    async fn test_analyze_rejects_non_image_upload() {
        let request = multipart_request(
            "/api/v1/analyze",
            &[
                ("job_role", None, b"Data Analyst".as_slice()),
                ("resume", Some("resume.txt"), b"plain text resume".as_slice()),
            ],
        );
        let (status, body) = send(router(ScriptedGateway::new()), request).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_MEDIA");
    }

    #[tokio::test]
    async fn test_analyze_requires_job_role() {
        let png: [u8; 10] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
        let request =
            multipart_request("/api/v1/analyze", &[("resume", Some("r.png"), png.as_slice())]);
        let (status, body) = send(router(ScriptedGateway::new()), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "job_role cannot be empty");
    }

    #[tokio::test]
    async fn test_upload_rejects_non_pdf() {
        let request = multipart_request(
            "/api/v1/suggestions/upload",
            &[("resume", Some("resume.docx"), b"PK\x03\x04".as_slice())],
        );
        let (status, _) = send(router(ScriptedGateway::new()), request).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
