//! Geo Locator Port
//!
//! Defines the interface for resolving a public IP address to a city name.

use async_trait::async_trait;

/// Resolver for public IP address to city name.
///
/// This is an outbound port that abstracts the geocoding provider. A
/// successful lookup with no usable city yields the literal `"Unknown"`;
/// an `Err` means the provider itself was unreachable or broken.
#[async_trait]
pub trait GeoLocator: Send + Sync {
    /// Resolve an address to a city (or region) name.
    async fn locate(&self, address: &str) -> anyhow::Result<String>;
}
