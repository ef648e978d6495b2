//! HTTP REST API.
//!
//! `POST /api/scrape` takes `{"url": "..."}` and answers with the flat
//! extraction result `{url, title, image, price}`. Failures are JSON
//! objects with an `error` key and, where useful, a `detail` key.

use anyhow::Context;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::error::ExtractError;
use crate::extractors::{ExtractionRequest, ExtractionResult};
use crate::scrape::Extractor;

/// Errors returned by the REST handlers
#[derive(Debug)]
pub enum ApiError {
    MissingUrl,
    InvalidBody(String),
    Extraction(ExtractError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MissingUrl => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "URL is required" }),
            ),
            ApiError::InvalidBody(detail) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid request body", "detail": detail }),
            ),
            ApiError::Extraction(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Scrape failed", "detail": e.to_string() }),
            ),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ExtractError> for ApiError {
    fn from(e: ExtractError) -> Self {
        ApiError::Extraction(e)
    }
}

/// Build the axum Router with all REST endpoints.
pub fn router(extractor: Extractor) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/scrape", post(handle_scrape))
        .layer(cors)
        .with_state(extractor)
}

/// Bind the listening socket.
///
/// `host` may be an IP literal (IPv4 or bare IPv6 such as `::1`) or a
/// hostname like `localhost`, which is resolved first.
pub async fn bind(host: &str, port: u16) -> anyhow::Result<TcpListener> {
    TcpListener::bind((host, port))
        .await
        .with_context(|| format!("failed to bind {host} port {port}"))
}

/// Serve the REST API on `listener`; returns after Ctrl-C or SIGTERM.
pub async fn start(listener: TcpListener, extractor: Extractor) -> anyhow::Result<()> {
    tracing::info!("REST API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(extractor))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("REST API stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}

// ── Handlers ────────────────────────────────────────────────────

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn handle_scrape(
    State(extractor): State<Extractor>,
    body: Result<Json<ExtractionRequest>, JsonRejection>,
) -> Result<Json<ExtractionResult>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::InvalidBody(e.body_text()))?;
    let url = request.url().ok_or(ApiError::MissingUrl)?;

    match extractor.extract(url).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            tracing::warn!(url, error = %e, "scrape failed");
            Err(e.into())
        }
    }
}
