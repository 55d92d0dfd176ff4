//! Public API Server
//!
//! HTTP entry point for end users: runs the weather pipeline for the
//! calling client and returns the composed message.

use crate::application::WeatherPipeline;
use crate::infrastructure::shutdown_signal;
use axum::{
    extract::{ConnectInfo, State},
    http::{HeaderMap, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// API server state.
#[derive(Clone)]
pub struct ApiState {
    pub pipeline: Arc<WeatherPipeline>,
}

/// Public-facing API server.
pub struct ApiServer {
    listen_addr: String,
    state: ApiState,
}

impl ApiServer {
    pub fn new(listen_addr: String, pipeline: Arc<WeatherPipeline>) -> Self {
        Self {
            listen_addr,
            state: ApiState { pipeline },
        }
    }

    /// Build the router (exposed for handler tests).
    pub fn router(state: ApiState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/api/weather", get(weather_handler))
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods([Method::GET, Method::OPTIONS])
                    .allow_headers(Any),
            )
            .with_state(state)
    }

    /// Run the API server until a shutdown signal arrives.
    pub async fn run(&self) -> anyhow::Result<()> {
        let app = Self::router(self.state.clone())
            .into_make_service_with_connect_info::<SocketAddr>();

        let listener = TcpListener::bind(&self.listen_addr).await?;
        tracing::info!("public API listening on {}", self.listen_addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

/// Effective client address for a request.
///
/// Proxies in front of the service put the real client into `X-Real-IP`;
/// failing that, the first entry of `X-Forwarded-For` is the client; the
/// socket peer address is the last resort.
fn client_address(headers: &HeaderMap, peer: SocketAddr) -> String {
    if let Some(value) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    if let Some(value) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = value.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    peer.ip().to_string()
}

// Handler functions

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn weather_handler(
    State(state): State<ApiState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let client = client_address(&headers, peer);
    let message = state.pipeline.resolve_weather_for_client(&client).await;

    Json(serde_json::json!({ "data": message }))
}
