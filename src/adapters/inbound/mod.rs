mod api_server;
mod weather_server;

pub use api_server::ApiServer;
pub use weather_server::WeatherServer;

// Re-export for external use (e.g., integration tests)
#[allow(unused_imports)]
pub use api_server::ApiState;
#[allow(unused_imports)]
pub use weather_server::{WeatherQuery, WeatherServerState};
