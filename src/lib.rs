//! weathervane Library
//!
//! This module exposes the weathervane components for use in integration
//! tests and as a library.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use application::{IpResolver, PipelineError, WeatherPipeline};
pub use config::load_config;
pub use domain::entities::{ResolutionEntry, ResolutionSource, WeatherReport};
pub use domain::ports::{GeoLocator, PublicIpProvider, ResolutionCache, WeatherSource};
pub use domain::services::AddressClassifier;
pub use domain::value_objects::{CityName, Classification};
pub use infrastructure::{ProviderRace, RaceConfig};
