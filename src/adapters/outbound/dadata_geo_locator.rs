//! DaData Geo Locator
//!
//! Implements GeoLocator against the DaData iplocate API.

use crate::domain::ports::GeoLocator;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Geocoding client for the DaData iplocate endpoint.
///
/// Sends `{"ip": "..."}` with token authorization and extracts the city
/// from the nested `location.data` block, falling back to the region and
/// then to the literal `"Unknown"` when the provider has no answer for the
/// address. Provider errors and timeouts surface as `Err`; an address the
/// provider simply does not know is NOT an error.
pub struct DadataGeoLocator {
    api_url: String,
    token: String,
    client: reqwest::Client,
}

/// City used when the provider response carries no location data.
pub const UNKNOWN_CITY: &str = "Unknown";

#[derive(Debug, Deserialize)]
struct IpLocateResponse {
    location: Option<LocatedAddress>,
}

#[derive(Debug, Deserialize)]
struct LocatedAddress {
    data: Option<AddressData>,
}

#[derive(Debug, Deserialize)]
struct AddressData {
    city: Option<String>,
    region: Option<String>,
}

impl DadataGeoLocator {
    /// Create a locator with its own bounded-timeout HTTP client.
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building geo HTTP client")?;

        Ok(Self {
            api_url: api_url.into(),
            token: token.into(),
            client,
        })
    }
}

#[async_trait]
impl GeoLocator for DadataGeoLocator {
    async fn locate(&self, address: &str) -> anyhow::Result<String> {
        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Token {}", self.token))
            .header("Accept", "application/json")
            .json(&serde_json::json!({ "ip": address }))
            .send()
            .await
            .context("geo provider request failed")?
            .error_for_status()
            .context("geo provider returned an error status")?;

        let parsed: IpLocateResponse = response
            .json()
            .await
            .context("geo provider returned malformed JSON")?;

        let city = parsed
            .location
            .and_then(|l| l.data)
            .and_then(|d| d.city.or(d.region))
            .unwrap_or_else(|| UNKNOWN_CITY.to_string());

        Ok(city)
    }
}
