mod geo_locator;
mod public_ip_provider;
mod resolution_cache;
mod weather_source;

pub use geo_locator::GeoLocator;
pub use public_ip_provider::PublicIpProvider;
pub use resolution_cache::ResolutionCache;
pub use weather_source::WeatherSource;
