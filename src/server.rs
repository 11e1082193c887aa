//! JSON HTTP API over the paper aggregator and the summarization service.
//!
//! ## Endpoints
//!
//! - `GET /api/papers?query=...`: ranked papers from all enabled sources
//! - `POST /api/summary`: summarize a block of text
//! - `GET /health`: liveness check

use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use paperlens_search::{AggregatorConfig, ScoredPaper};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::summary::SummaryClient;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query string of `GET /api/papers`.
#[derive(Debug, Clone, Deserialize)]
pub struct PapersParams {
    /// Free-text search query.
    pub query: Option<String>,
}

/// Body of a successful `GET /api/papers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PapersResponse {
    /// Ranked papers, best first.
    pub papers: Vec<ScoredPaper>,
}

/// Body of `POST /api/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// Text to summarize.
    #[serde(default)]
    pub text: String,
}

/// Body of a successful `POST /api/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// The generated summary.
    pub summary: String,
}

/// Error body returned with every non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct AppState {
    search: Arc<AggregatorConfig>,
    summary: SummaryClient,
}

// ---------------------------------------------------------------------------
// PaperServer
// ---------------------------------------------------------------------------

/// HTTP server for paper search and summaries.
pub struct PaperServer {
    /// The address the server is listening on.
    addr: SocketAddr,
    /// Handle to the background server task.
    handle: JoinHandle<()>,
}

impl PaperServer {
    /// Start the HTTP server.
    ///
    /// Validates `config`, binds to `{server.host}:{server.port}` (use port
    /// `0` for auto-assign) and begins serving in a background tokio task.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the TCP listener
    /// cannot bind.
    pub async fn start(config: &AppConfig) -> Result<Self> {
        config.validate()?;

        let state = AppState {
            search: Arc::new(config.search.clone()),
            summary: SummaryClient::new(&config.summary)?,
        };
        let app = router(state);

        let bind_addr = format!("{}:{}", config.server.host, config.server.port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| AppError::Server(format!("bind to {bind_addr} failed: {e}")))?;

        let addr = listener
            .local_addr()
            .map_err(|e| AppError::Server(format!("failed to get local addr: {e}")))?;

        info!("paper server listening on http://{addr}");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("paper server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Returns the address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for PaperServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/papers", get(handle_papers))
        .route("/api/summary", post(handle_summary))
        .route("/health", get(handle_health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// `GET /api/papers`: aggregate and rank papers for `query`.
async fn handle_papers(
    State(state): State<AppState>,
    Query(params): Query<PapersParams>,
) -> Response {
    let query = match params.query.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => q.to_owned(),
        _ => return error_response(StatusCode::BAD_REQUEST, "Query parameter is required"),
    };

    match paperlens_search::aggregate(&query, &state.search).await {
        Ok(papers) => {
            tracing::debug!(count = papers.len(), "papers endpoint served");
            Json(PapersResponse { papers }).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "aggregation rejected configuration");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// `POST /api/summary`: forward text to the summarization service.
///
/// A body that is not a JSON object gets the same `{"error": ...}` shape as
/// every other failure.
async fn handle_summary(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SummaryRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected summary request body");
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    if request.text.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No text provided");
    }

    match state.summary.summarize(&request.text).await {
        Ok(summary) => Json(SummaryResponse { summary }).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "summarization failed");
            error_response(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

/// `GET /health`: liveness check.
async fn handle_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn papers_params_query_is_optional() {
        let params: PapersParams = serde_json::from_str("{}").unwrap();
        assert!(params.query.is_none());
    }

    #[test]
    fn summary_request_text_defaults_to_empty() {
        let request: SummaryRequest = serde_json::from_str("{}").unwrap();
        assert!(request.text.is_empty());
    }

    #[test]
    fn error_response_shape() {
        let json = serde_json::to_value(ErrorResponse {
            error: "No text provided".into(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "error": "No text provided" }));
    }

    #[tokio::test]
    async fn start_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        config.search.max_results = 0;
        let result = PaperServer::start(&config).await;
        assert!(matches!(result, Err(AppError::Search(_))));
    }

    #[tokio::test]
    async fn start_binds_ephemeral_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        let server = PaperServer::start(&config).await.unwrap();
        assert_ne!(server.port(), 0);
        assert!(server.addr().ip().is_loopback());
        server.shutdown();
    }
}
