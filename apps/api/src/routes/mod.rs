pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::script::handlers as script;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Panel generation
        .route(
            "/api/v1/panels/generate",
            post(generation::handle_generate_panels),
        )
        // Script formatting
        .route("/api/v1/scripts/format", post(script::handle_format))
        .route("/api/v1/scripts/validate", post(script::handle_validate))
        .route(
            "/api/v1/scripts/export/text",
            post(script::handle_export_text),
        )
        .route(
            "/api/v1/scripts/export/json",
            post(script::handle_export_json),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tokio_util::sync::CancellationToken;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::generation::composition::CompositionSynthesizer;
    use crate::orchestrator::OfflineOrchestrator;

    fn test_app() -> Router {
        let config = Config {
            port: 0,
            rust_log: "info".to_string(),
            orchestrator_url: None,
            orchestrator_api_key: None,
            orchestrator_timeout: Duration::from_millis(15_000),
            orchestrator_max_agents: 2,
        };
        let synthesizer = CompositionSynthesizer::new(
            Arc::new(OfflineOrchestrator),
            config.orchestrator_timeout,
            config.orchestrator_max_agents,
        );
        build_router(AppState {
            config,
            synthesizer: Arc::new(synthesizer),
            shutdown: CancellationToken::new(),
        })
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> Response {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        app.oneshot(request).await.unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_str(&body_string(response).await).unwrap()
    }

    fn script_body() -> Value {
        json!({
            "cover": {"title": "Night Shift", "writer": "R. Okafor", "date": "2024-05-01"},
            "pages": [{
                "pageNumber": 1,
                "panels": [{
                    "number": 1,
                    "size": "large",
                    "description": "The harbor at dawn",
                    "artDirection": "Wide shot, eye level.",
                    "composition": {
                        "shotType": "wide-shot",
                        "angle": "eye-level",
                        "perspective": "two-point",
                        "focalPoint": {"x": 0.5, "y": 0.5}
                    },
                    "location": "Harbor"
                }]
            }]
        })
    }

    #[tokio::test]
    async fn test_health_returns_ok() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["orchestrator"], "offline");
    }

    #[tokio::test]
    async fn test_generate_offline_returns_fallback_pages() {
        let response = post_json(
            test_app(),
            "/api/v1/panels/generate",
            json!({
                "beat": {"description": "Mara runs. Theo hides. The tower explodes!"},
                "options": {"targetPages": 1, "style": "manga"}
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["totalPanels"], 3);
        assert_eq!(json["fallbackPanels"], 3);
        assert_eq!(json["style"], "manga");
        assert_eq!(json["pages"][0]["panels"][0]["composition"]["shotType"], "medium-shot");
    }

    #[tokio::test]
    async fn test_generate_rejects_zero_pages() {
        let response = post_json(
            test_app(),
            "/api/v1/panels/generate",
            json!({"beat": {"description": "Mara runs."}, "options": {"targetPages": 0}}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_generate_rejects_negative_importance() {
        let response = post_json(
            test_app(),
            "/api/v1/panels/generate",
            json!({"beat": {"moments": [{"description": "Mara waits", "importance": -3}]}}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_beat() {
        let response =
            post_json(test_app(), "/api/v1/panels/generate", json!({"beat": {}})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_format_computes_metrics() {
        let response = post_json(test_app(), "/api/v1/scripts/format", script_body()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["cover"]["artist"], "TBD");
        assert_eq!(json["pages"][0]["layoutSuggestion"], "Full-page splash panel");
        // 4 + 0.5
        assert_eq!(json["estimatedArtHours"], 4.5);
    }

    #[tokio::test]
    async fn test_validate_reports_silent_panel() {
        let response = post_json(test_app(), "/api/v1/scripts/validate", script_body()).await;
        let json = body_json(response).await;
        assert_eq!(json["valid"], true);
        assert_eq!(json["warnings"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_export_text_is_plain_text() {
        let response = post_json(test_app(), "/api/v1/scripts/export/text", script_body()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/plain"));
        let text = body_string(response).await;
        assert!(text.contains("PANEL 1 [large]"));
        assert!(text.contains("Date: 2024-05-01"));
    }

    #[tokio::test]
    async fn test_export_json_round_trips() {
        let response = post_json(test_app(), "/api/v1/scripts/export/json", script_body()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["cover"]["title"], "Night Shift");
    }
}
