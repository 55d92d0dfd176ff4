//! Weather Hop Source
//!
//! Implements WeatherSource over the internal weather-service hop.

use crate::domain::entities::WeatherReport;
use crate::domain::ports::WeatherSource;
use crate::domain::value_objects::CityName;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Client for the internal weather service.
///
/// The pipeline's weather stage does not talk to the upstream provider
/// directly; it crosses one internal network hop with
/// `POST {"city": "..."}` and receives `{"weather": {description, temp}}`.
pub struct WeatherHopSource {
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct HopResponse {
    weather: HopWeather,
}

#[derive(Debug, Deserialize)]
struct HopWeather {
    description: String,
    temp: f64,
}

impl WeatherHopSource {
    /// Create a hop client with its own bounded-timeout HTTP client.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building weather-hop HTTP client")?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

#[async_trait]
impl WeatherSource for WeatherHopSource {
    async fn current(&self, city: &CityName) -> anyhow::Result<WeatherReport> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "city": city.as_str() }))
            .send()
            .await
            .context("weather service request failed")?
            .error_for_status()
            .context("weather service returned an error status")?;

        let parsed: HopResponse = response
            .json()
            .await
            .context("weather service returned malformed JSON")?;

        Ok(WeatherReport::new(parsed.weather.description, parsed.weather.temp))
    }
}
