//! Public IP Provider Port
//!
//! Defines the interface for "what is my public IP" lookup endpoints.

use async_trait::async_trait;

/// One external public-IP lookup endpoint.
///
/// This is an outbound port. Implementations typically perform a plain-text
/// HTTP GET whose response body is a bare address string. Several providers
/// are raced against each other; any single one is allowed to be slow,
/// wrong or down.
#[async_trait]
pub trait PublicIpProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Fetch the raw response body from the provider.
    ///
    /// The caller is responsible for validating that the body parses as an
    /// address; providers only transport bytes.
    async fn fetch(&self) -> anyhow::Result<String>;
}
