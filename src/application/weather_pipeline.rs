//! Weather Pipeline - Main application use case
//!
//! Sequences address resolution, geo lookup and weather fetch into one
//! linear run per request and absorbs every stage failure into a degraded,
//! human-readable answer. Nothing escapes this boundary as a fault.

use crate::application::IpResolver;
use crate::domain::ports::{GeoLocator, WeatherSource};
use crate::domain::value_objects::CityName;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Typed cause for a degraded pipeline run.
///
/// Each variant maps to exactly one stage; the stage that fails is the
/// stage that names the error, and no later stage runs.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The geocoding provider was unreachable, errored or timed out.
    #[error("geo lookup unavailable: {0}")]
    GeoUnavailable(String),
    /// The weather hop was unreachable, errored or timed out.
    #[error("weather fetch unavailable: {0}")]
    WeatherUnavailable(String),
    /// The geo stage produced a city that fails validation; the weather
    /// provider is never called with it.
    #[error("invalid city name {0:?}")]
    InvalidCity(String),
}

impl PipelineError {
    /// Message shown to the end user. Details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::GeoUnavailable(_) => {
                "geo service is temporarily unavailable, please try again later".to_string()
            }
            Self::WeatherUnavailable(_) => {
                "weather service is temporarily unavailable, please try again later".to_string()
            }
            Self::InvalidCity(_) => {
                "could not determine a valid city for this location".to_string()
            }
        }
    }
}

/// Pipeline orchestrator.
///
/// One run walks `Resolve -> GeoLookup -> WeatherFetch -> Respond` in
/// strict sequence; each external call is attempted exactly once, under its
/// own timeout, with no retries. A correlation id minted at the start tags
/// every log line of the run and is never exposed in the response body.
pub struct WeatherPipeline {
    resolver: Arc<IpResolver>,
    geo: Arc<dyn GeoLocator>,
    weather: Arc<dyn WeatherSource>,
}

impl WeatherPipeline {
    /// Create a pipeline over injected stages.
    pub fn new(
        resolver: Arc<IpResolver>,
        geo: Arc<dyn GeoLocator>,
        weather: Arc<dyn WeatherSource>,
    ) -> Self {
        Self {
            resolver,
            geo,
            weather,
        }
    }

    /// The single operation exposed to HTTP-facing callers.
    ///
    /// Returns either `"<city> <description> <temp>"` or a degraded error
    /// message. Never panics, never returns an error.
    pub async fn resolve_weather_for_client(&self, client_address: &str) -> String {
        let request_id = Uuid::new_v4();

        match self.run(request_id, client_address).await {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(request_id = %request_id, error = %e, "pipeline degraded");
                e.user_message()
            }
        }
    }

    /// One full pipeline run under a correlation id.
    async fn run(&self, request_id: Uuid, client_address: &str) -> Result<String, PipelineError> {
        tracing::info!(request_id = %request_id, client = %client_address, "pipeline start");

        // Resolve: total by contract, cannot fail.
        let resolution = self.resolver.resolve(client_address).await;
        tracing::info!(
            request_id = %request_id,
            input = %resolution.input,
            resolved = %resolution.resolved,
            source = ?resolution.source,
            "address resolved"
        );

        // GeoLookup: one attempt, bounded by the locator's own timeout.
        let raw_city = self
            .geo
            .locate(&resolution.resolved)
            .await
            .map_err(|e| PipelineError::GeoUnavailable(format!("{:#}", e)))?;
        tracing::info!(request_id = %request_id, city = %raw_city, "geo lookup complete");

        // Validation gate: an unacceptable city never reaches the weather hop.
        let city = CityName::parse(&raw_city)
            .map_err(|_| PipelineError::InvalidCity(raw_city.clone()))?;

        // WeatherFetch: one attempt over the internal hop.
        let report = self
            .weather
            .current(&city)
            .await
            .map_err(|e| PipelineError::WeatherUnavailable(format!("{:#}", e)))?;
        tracing::info!(
            request_id = %request_id,
            description = %report.description,
            temp = report.rounded_temp(),
            "weather fetched"
        );

        Ok(format!(
            "{} {} {:.1}",
            city,
            report.description,
            report.rounded_temp()
        ))
    }
}
