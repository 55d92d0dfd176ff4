//! Internal Weather Server
//!
//! HTTP endpoint for the internal hop: accepts a city name, validates it,
//! and answers with live weather from the upstream provider.

use crate::domain::ports::WeatherSource;
use crate::domain::value_objects::CityName;
use crate::infrastructure::shutdown_signal;
use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Weather request from the geo stage.
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub city: String,
}

/// Weather server state.
#[derive(Clone)]
pub struct WeatherServerState {
    pub source: Arc<dyn WeatherSource>,
}

/// Internal weather service endpoint.
pub struct WeatherServer {
    listen_addr: String,
    state: WeatherServerState,
}

impl WeatherServer {
    pub fn new(listen_addr: String, source: Arc<dyn WeatherSource>) -> Self {
        Self {
            listen_addr,
            state: WeatherServerState { source },
        }
    }

    /// Build the router (exposed for handler tests).
    pub fn router(state: WeatherServerState) -> Router {
        Router::new()
            .route("/api/weather", post(fetch_weather_handler))
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods([Method::POST, Method::OPTIONS])
                    .allow_headers(Any),
            )
            .with_state(state)
    }

    /// Run the weather server until a shutdown signal arrives.
    pub async fn run(&self) -> anyhow::Result<()> {
        let app = Self::router(self.state.clone());

        let listener = TcpListener::bind(&self.listen_addr).await?;
        tracing::info!("weather service listening on {}", self.listen_addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

// Handler functions

async fn fetch_weather_handler(
    State(state): State<WeatherServerState>,
    Json(query): Json<WeatherQuery>,
) -> impl IntoResponse {
    // Fail closed: an unacceptable city never reaches the upstream provider.
    let city = match CityName::parse(&query.city) {
        Ok(city) => city,
        Err(_) => {
            tracing::warn!(city = %query.city, "rejected city name");
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": "invalid city name" })),
            );
        }
    };

    match state.source.current(&city).await {
        Ok(report) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "weather": {
                    "description": report.description,
                    "temp": report.rounded_temp(),
                }
            })),
        ),
        Err(e) => {
            tracing::error!(city = %city, error = %format!("{:#}", e), "weather fetch failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({ "error": "failed to fetch weather" })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::WeatherReport;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    struct MockSource {
        report: Result<WeatherReport, String>,
        calls: AtomicUsize,
    }

    impl MockSource {
        fn returning(description: &str, temp: f64) -> Arc<Self> {
            Arc::new(Self {
                report: Ok(WeatherReport::new(description, temp)),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                report: Err("upstream down".to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WeatherSource for MockSource {
        async fn current(&self, _city: &CityName) -> anyhow::Result<WeatherReport> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.report {
                Ok(report) => Ok(report.clone()),
                Err(reason) => anyhow::bail!("{}", reason),
            }
        }
    }

    fn post_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .uri("/api/weather")
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_valid_city_returns_rounded_weather() {
        let source = MockSource::returning("clear sky", 21.36);
        let app = WeatherServer::router(WeatherServerState {
            source: source.clone(),
        });

        let response = app
            .oneshot(post_request(serde_json::json!({ "city": "Moscow" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["weather"]["description"], "clear sky");
        assert_eq!(json["weather"]["temp"], 21.4);
    }

    #[tokio::test]
    async fn test_invalid_city_rejected_before_upstream() {
        let source = MockSource::returning("clear sky", 21.36);
        let app = WeatherServer::router(WeatherServerState {
            source: source.clone(),
        });

        let response = app
            .oneshot(post_request(serde_json::json!({ "city": "City123" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_upstream_failure_maps_to_bad_gateway() {
        let source = MockSource::failing();
        let app = WeatherServer::router(WeatherServerState {
            source: source.clone(),
        });

        let response = app
            .oneshot(post_request(serde_json::json!({ "city": "Moscow" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_get_method_not_allowed() {
        let source = MockSource::returning("clear sky", 21.36);
        let app = WeatherServer::router(WeatherServerState { source });

        let request = Request::builder()
            .uri("/api/weather")
            .method("GET")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_missing_city_field_is_client_error() {
        let source = MockSource::returning("clear sky", 21.36);
        let app = WeatherServer::router(WeatherServerState {
            source: source.clone(),
        });

        let response = app
            .oneshot(post_request(serde_json::json!({ "town": "Moscow" })))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_cyrillic_city_accepted() {
        let source = MockSource::returning("ясно", -2.0);
        let app = WeatherServer::router(WeatherServerState { source });

        let response = app
            .oneshot(post_request(serde_json::json!({ "city": "Москва" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
