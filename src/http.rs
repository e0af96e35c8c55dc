//! HTTP health-check listener.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /`: liveness, plain `OK`.
//! - `GET /health`: `{ "ok": true, "storage": "ok" }`, or 503 with
//!   `"storage": "error"` when the backend cannot list its keys.

use std::net::SocketAddr;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tracing::{info, warn};

use crate::storage::StorageService;

/// Build the health-check router over `storage`.
pub fn router(storage: StorageService) -> Router {
    Router::new()
        .route("/", get(liveness_handler))
        .route("/health", get(health_handler))
        .with_state(storage)
}

/// Serve `router` on `0.0.0.0:<port>` until the listener fails.
pub async fn serve(router: Router, port: u16) -> Result<(), std::io::Error> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "health-check server listening");
    axum::serve(listener, router).await
}

async fn liveness_handler() -> &'static str {
    "OK"
}

async fn health_handler(State(storage): State<StorageService>) -> impl IntoResponse {
    match storage.keys().await {
        Ok(_) => (StatusCode::OK, Json(json!({ "ok": true, "storage": "ok" }))),
        Err(e) => {
            warn!(error = %e, "storage health probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "ok": false, "storage": "error" })),
            )
        }
    }
}
