//! HTTP server
//!
//! Thin axum layer over [`ResearchOrchestrator`]. Handlers hold no state of
//! their own; every request gets its own orchestration run.

mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::research::ResearchOrchestrator;
use crate::types::{CogniError, Result};

/// Application state shared across handlers
#[derive(Debug)]
pub struct AppState {
    pub orchestrator: ResearchOrchestrator,
}

impl AppState {
    pub fn new(orchestrator: ResearchOrchestrator) -> Self {
        Self { orchestrator }
    }
}

pub(crate) type SharedState = Arc<AppState>;

/// Full application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::research_routes())
        .merge(routes::health_routes())
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
}

/// Bind `addr` and serve until the process is stopped
pub async fn run(addr: &str, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        CogniError::Config(format!("Failed to bind {}: {}", addr, e))
    })?;
    let local = listener.local_addr()?;
    info!("Listening on http://{}", local);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
