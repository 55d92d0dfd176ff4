//! OpenWeather Source
//!
//! Implements WeatherSource against the OpenWeatherMap current-weather API.

use crate::domain::entities::WeatherReport;
use crate::domain::ports::WeatherSource;
use crate::domain::value_objects::CityName;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Upstream weather client.
///
/// Queries by city name with metric units and a configurable response
/// language, and extracts the primary condition description plus the
/// temperature.
pub struct OpenWeatherSource {
    api_url: String,
    api_key: String,
    lang: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    weather: Vec<Condition>,
    main: MainBlock,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
}

impl OpenWeatherSource {
    /// Create a source with its own bounded-timeout HTTP client.
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        lang: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building weather HTTP client")?;

        Ok(Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            lang: lang.into(),
            client,
        })
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherSource {
    async fn current(&self, city: &CityName) -> anyhow::Result<WeatherReport> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("q", city.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .await
            .context("weather provider request failed")?
            .error_for_status()
            .context("weather provider returned an error status")?;

        let parsed: CurrentWeatherResponse = response
            .json()
            .await
            .context("weather provider returned malformed JSON")?;

        let condition = parsed
            .weather
            .first()
            .context("weather provider response has no conditions")?;

        Ok(WeatherReport::new(condition.description.clone(), parsed.main.temp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn source_for(server: &MockServer) -> OpenWeatherSource {
        OpenWeatherSource::new(
            format!("{}/data/2.5/weather", server.uri()),
            "test-key",
            "ru",
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_current_parses_description_and_temp() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "Moscow"))
            .and(query_param("appid", "test-key"))
            .and(query_param("units", "metric"))
            .and(query_param("lang", "ru"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "weather": [{ "id": 800, "main": "Clear", "description": "clear sky" }],
                "main": { "temp": 21.36, "feels_like": 20.9, "humidity": 40 }
            })))
            .mount(&server)
            .await;

        let source = source_for(&server).await;
        let city = CityName::parse("Moscow").unwrap();
        let report = source.current(&city).await.unwrap();

        assert_eq!(report.description, "clear sky");
        assert!((report.temp_celsius - 21.36).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_current_unknown_city_is_err() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "cod": "404", "message": "city not found"
            })))
            .mount(&server)
            .await;

        let source = source_for(&server).await;
        let city = CityName::parse("Nowhere").unwrap();

        assert!(source.current(&city).await.is_err());
    }

    #[tokio::test]
    async fn test_current_empty_conditions_is_err() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "weather": [],
                "main": { "temp": 10.0 }
            })))
            .mount(&server)
            .await;

        let source = source_for(&server).await;
        let city = CityName::parse("Moscow").unwrap();

        assert!(source.current(&city).await.is_err());
    }

    #[tokio::test]
    async fn test_current_timeout_is_err() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({
                        "weather": [{ "description": "clear sky" }],
                        "main": { "temp": 5.0 }
                    }))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let source = OpenWeatherSource::new(
            format!("{}/data/2.5/weather", server.uri()),
            "test-key",
            "ru",
            Duration::from_millis(100),
        )
        .unwrap();

        let city = CityName::parse("Moscow").unwrap();
        assert!(source.current(&city).await.is_err());
    }
}
