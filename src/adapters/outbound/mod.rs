mod dadata_geo_locator;
mod http_ip_provider;
mod mutex_resolution_cache;
mod openweather_source;
mod weather_hop_source;

pub use dadata_geo_locator::{DadataGeoLocator, UNKNOWN_CITY};
pub use http_ip_provider::HttpIpProvider;
pub use mutex_resolution_cache::MutexResolutionCache;
pub use openweather_source::OpenWeatherSource;
pub use weather_hop_source::WeatherHopSource;
