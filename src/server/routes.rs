//! API routes
//!
//! - `POST /api/research`: answer a query
//! - `GET /health`: liveness probe

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::warn;

use super::SharedState;

// ============================================================================
// Research Routes
// ============================================================================

pub fn research_routes() -> Router<SharedState> {
    Router::new().route("/api/research", post(research))
}

/// Query text of a request body; missing or non-string values read as empty
fn query_of(body: &Value) -> &str {
    body.get("query").and_then(Value::as_str).unwrap_or("")
}

async fn research(State(state): State<SharedState>, body: Bytes) -> Response {
    // Any malformed body maps to the same 400 payload
    let body: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Rejected research request");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid JSON" })),
            )
                .into_response();
        }
    };

    let response = state.orchestrator.research(query_of(&body)).await;
    Json(response).into_response()
}

// ============================================================================
// Health Routes
// ============================================================================

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

pub fn health_routes() -> Router<SharedState> {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::super::{AppState, router};
    use super::*;
    use crate::research::ResearchOrchestrator;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState::new(ResearchOrchestrator::builder().build()))
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_research(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/research")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[test]
    fn test_query_of() {
        assert_eq!(query_of(&json!({ "query": "what is ai" })), "what is ai");
        assert_eq!(query_of(&json!({ "query": 42 })), "");
        assert_eq!(query_of(&json!({})), "");
        assert_eq!(query_of(&json!(null)), "");
    }

    #[tokio::test]
    async fn test_invalid_json_is_400() {
        let (status, body) = send(post_research("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid JSON" }));
    }

    #[tokio::test]
    async fn test_empty_body_is_400() {
        let (status, _) = send(post_research("")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_research_returns_offline_answer() {
        let (status, body) = send(post_research(r#"{"query":"what is blockchain"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["mode"], "offline_fallback");
        assert_eq!(body["meta"]["provider_count"], 0);
        assert_eq!(body["research"]["title"], "Research: what is blockchain");
        assert_eq!(body["research"]["sources"], json!(["Internal Database"]));
        assert_eq!(body["research"]["sections"][0]["heading"], "Definition");
        assert_eq!(body["images"], json!([]));
        assert!(body["meta"].get("timestamp").is_none());
    }

    #[tokio::test]
    async fn test_missing_query_still_answers() {
        let (status, body) = send(post_research(r#"{"question":"ignored"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["mode"], "offline_fallback");
        assert!(!body["research"]["answer"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}
