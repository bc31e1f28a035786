// File: ./src/server.rs
//! HTTP surface: the webhook at `POST /` and a health check.
use crate::config::Config;
use crate::handler::{ApiError, ChoreRequest, ChoreResponse, ChoreService};

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use axum::routing::{get, post};
use axum::{Json, Router};
use http::Method;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Debug)]
pub struct AppState {
    pub service: ChoreService,
}

pub type SharedState = Arc<AppState>;

pub fn router(service: ChoreService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", post(handle_webhook))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(Arc::new(AppState { service }))
}

// The body is taken raw so malformed JSON, or a body sent with a non-JSON
// content type, degrades to an empty request instead of axum's own rejection.
async fn handle_webhook(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ChoreResponse>, ApiError> {
    let request = if is_json_content(&headers) {
        ChoreRequest::from_body(&body)
    } else {
        ChoreRequest::from_body(b"")
    };
    state.service.handle(request).await.map(Json)
}

/// `application/json` or any `application/*+json`, parameters ignored.
pub fn is_json_content(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

async fn handle_health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Bind on all interfaces and serve until Ctrl-C.
pub async fn serve(config: &Config) -> Result<()> {
    let service = ChoreService::new(config)?;
    let app = router(service);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    log::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Received shutdown signal");
}
