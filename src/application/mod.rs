mod ip_resolver;
mod weather_pipeline;

pub use ip_resolver::IpResolver;
pub use weather_pipeline::{PipelineError, WeatherPipeline};
