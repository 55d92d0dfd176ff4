//! Weather Source Port
//!
//! Defines the interface for fetching live weather for a city.

use crate::domain::entities::WeatherReport;
use crate::domain::value_objects::CityName;
use async_trait::async_trait;

/// Provider of live weather data.
///
/// This is an outbound port. Implementations may talk to the upstream
/// weather API directly or hop through the internal weather service;
/// either way the input city has already been validated.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Fetch the current weather for a city.
    async fn current(&self, city: &CityName) -> anyhow::Result<WeatherReport>;
}
