//! Domain Entities - Core business objects
//!
//! These entities represent the core concepts of the weathervane domain.
//! They have no external dependencies and contain only business logic.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// How a public-address resolution was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionSource {
    /// The input address was usable as-is (already public, or returned
    /// unchanged after every external provider failed).
    Direct,
    /// A fresh answer from one of the external lookup providers.
    ExternalService,
    /// A previously stored answer for the same input address.
    Cache,
}

/// Record of one public-address resolution.
///
/// Immutable once created. Cached entries live for the whole process -
/// there is no expiry, a deliberate staleness tradeoff.
#[derive(Debug, Clone)]
pub struct ResolutionEntry {
    /// The address the client arrived with.
    pub input: String,
    /// The effective public address.
    pub resolved: String,
    /// How the resolved value was obtained.
    pub source: ResolutionSource,
    /// When the resolution happened.
    pub resolved_at: SystemTime,
}

impl ResolutionEntry {
    /// Create a resolution record stamped with the current time.
    pub fn new(input: impl Into<String>, resolved: impl Into<String>, source: ResolutionSource) -> Self {
        Self {
            input: input.into(),
            resolved: resolved.into(),
            source,
            resolved_at: SystemTime::now(),
        }
    }

    /// An entry whose input needed no resolution at all.
    pub fn direct(address: impl Into<String>) -> Self {
        let address = address.into();
        Self::new(address.clone(), address, ResolutionSource::Direct)
    }
}

/// Live weather for one city.
///
/// Never cached - a report is fetched fresh for every pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Human-readable condition, e.g. "clear sky".
    pub description: String,
    /// Temperature in degrees Celsius as reported by the provider.
    pub temp_celsius: f64,
}

impl WeatherReport {
    pub fn new(description: impl Into<String>, temp_celsius: f64) -> Self {
        Self {
            description: description.into(),
            temp_celsius,
        }
    }

    /// Temperature rounded to one decimal place, the precision exposed to
    /// end users.
    pub fn rounded_temp(&self) -> f64 {
        (self.temp_celsius * 10.0).round() / 10.0
    }
}
