//! weathervane - Client weather service with hexagonal architecture
//!
//! This is the composition root that wires together all the components.

mod adapters;
mod application;
mod config;
mod domain;
mod infrastructure;

use crate::adapters::inbound::{ApiServer, WeatherServer};
use crate::adapters::outbound::{
    DadataGeoLocator, HttpIpProvider, MutexResolutionCache, OpenWeatherSource, WeatherHopSource,
};
use crate::application::{IpResolver, WeatherPipeline};
use crate::config::load_config;
use crate::domain::ports::{GeoLocator, ResolutionCache, WeatherSource};
use crate::infrastructure::{ProviderRace, RaceConfig};
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    tracing::info!(
        "starting weathervane api={} weather={} (hexagonal architecture)",
        cfg.listen_addr,
        cfg.weather_listen_addr
    );

    if cfg.geo_api_token.is_empty() {
        tracing::warn!("WEATHERVANE_GEO_API_TOKEN is not set - geo lookups will be rejected");
    }
    if cfg.weather_api_key.is_empty() {
        tracing::warn!("WEATHERVANE_WEATHER_API_KEY is not set - weather fetches will fail");
    }

    // ===== COMPOSITION ROOT =====
    // Wire up all adapters and services

    // 1. Create outbound adapters

    // Public-IP lookup providers (shared client, raced under a worker cap)
    let provider_client = reqwest::Client::new();
    let providers = HttpIpProvider::from_urls(&cfg.ip_providers, &provider_client);
    let race = Arc::new(ProviderRace::new(
        providers,
        RaceConfig {
            attempt_timeout: cfg.race_attempt_timeout(),
            overall_timeout: cfg.race_overall_timeout(),
            max_workers: cfg.race_workers,
        },
    ));

    // Resolution cache (one instance for the whole process)
    let cache: Arc<dyn ResolutionCache> = Arc::new(MutexResolutionCache::new());

    // Geo locator (DaData)
    let geo: Arc<dyn GeoLocator> = Arc::new(DadataGeoLocator::new(
        cfg.geo_api_url.clone(),
        cfg.geo_api_token.clone(),
        cfg.geo_timeout(),
    )?);

    // Weather stage: the pipeline crosses the internal hop; the hop itself
    // talks to the upstream provider.
    let hop: Arc<dyn WeatherSource> = Arc::new(WeatherHopSource::new(
        cfg.weather_hop_url.clone(),
        cfg.weather_timeout(),
    )?);
    let upstream: Arc<dyn WeatherSource> = Arc::new(OpenWeatherSource::new(
        cfg.weather_api_url.clone(),
        cfg.weather_api_key.clone(),
        cfg.weather_lang.clone(),
        cfg.weather_timeout(),
    )?);

    // 2. Create application services
    let resolver = Arc::new(IpResolver::new(cache, race));
    let pipeline = Arc::new(WeatherPipeline::new(resolver, geo, hop));

    // 3. Create inbound adapters and run both listeners
    let api_server = ApiServer::new(cfg.listen_addr.clone(), pipeline);
    let weather_server = WeatherServer::new(cfg.weather_listen_addr.clone(), upstream);

    tokio::try_join!(api_server.run(), weather_server.run())?;

    Ok(())
}
