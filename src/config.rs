use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // Listeners
    pub listen_addr: String,
    pub weather_listen_addr: String,
    pub debug: bool,

    // Public-IP race settings
    pub ip_providers: Vec<String>,
    pub race_attempt_timeout_secs: u64,
    pub race_overall_timeout_secs: u64,
    pub race_workers: usize,

    // Geo provider settings
    pub geo_api_url: String,
    pub geo_api_token: String,
    pub geo_timeout_secs: u64,

    // Weather settings
    pub weather_hop_url: String,
    pub weather_api_url: String,
    pub weather_api_key: String,
    pub weather_lang: String,
    pub weather_timeout_secs: u64,
}

impl Config {
    pub fn race_attempt_timeout(&self) -> Duration {
        Duration::from_secs(self.race_attempt_timeout_secs)
    }

    pub fn race_overall_timeout(&self) -> Duration {
        Duration::from_secs(self.race_overall_timeout_secs)
    }

    pub fn geo_timeout(&self) -> Duration {
        Duration::from_secs(self.geo_timeout_secs)
    }

    pub fn weather_timeout(&self) -> Duration {
        Duration::from_secs(self.weather_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:7999".to_string(),
            weather_listen_addr: "0.0.0.0:8002".to_string(),
            debug: false,
            ip_providers: Vec::new(),
            race_attempt_timeout_secs: 3,
            race_overall_timeout_secs: 5,
            race_workers: 3,
            geo_api_url: "https://suggestions.dadata.ru/suggestions/api/4_1/rs/iplocate/address"
                .to_string(),
            geo_api_token: String::new(),
            geo_timeout_secs: 5,
            weather_hop_url: "http://127.0.0.1:8002/api/weather".to_string(),
            weather_api_url: "https://api.openweathermap.org/data/2.5/weather".to_string(),
            weather_api_key: String::new(),
            weather_lang: "ru".to_string(),
            weather_timeout_secs: 5,
        }
    }
}

pub fn load_config() -> anyhow::Result<Config> {
    let listen_addr = std::env::var("WEATHERVANE_LISTEN_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:7999".to_string());

    let weather_listen_addr = std::env::var("WEATHERVANE_WEATHER_LISTEN_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8002".to_string());

    let debug = std::env::var("DEBUG").is_ok();

    // Public-IP race settings
    let ip_providers = std::env::var("WEATHERVANE_IP_PROVIDERS")
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let race_attempt_timeout_secs = std::env::var("WEATHERVANE_RACE_ATTEMPT_TIMEOUT_SECS")
        .unwrap_or_else(|_| "3".to_string())
        .parse()
        .unwrap_or(3);

    let race_overall_timeout_secs = std::env::var("WEATHERVANE_RACE_OVERALL_TIMEOUT_SECS")
        .unwrap_or_else(|_| "5".to_string())
        .parse()
        .unwrap_or(5);

    let race_workers = std::env::var("WEATHERVANE_RACE_WORKERS")
        .unwrap_or_else(|_| "3".to_string())
        .parse()
        .unwrap_or(3);

    // Geo provider settings
    let geo_api_url = std::env::var("WEATHERVANE_GEO_API_URL").unwrap_or_else(|_| {
        "https://suggestions.dadata.ru/suggestions/api/4_1/rs/iplocate/address".to_string()
    });

    let geo_api_token = std::env::var("WEATHERVANE_GEO_API_TOKEN").unwrap_or_default();

    let geo_timeout_secs = std::env::var("WEATHERVANE_GEO_TIMEOUT_SECS")
        .unwrap_or_else(|_| "5".to_string())
        .parse()
        .unwrap_or(5);

    // Weather settings
    let weather_hop_url = std::env::var("WEATHERVANE_WEATHER_HOP_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8002/api/weather".to_string());

    let weather_api_url = std::env::var("WEATHERVANE_WEATHER_API_URL")
        .unwrap_or_else(|_| "https://api.openweathermap.org/data/2.5/weather".to_string());

    let weather_api_key = std::env::var("WEATHERVANE_WEATHER_API_KEY").unwrap_or_default();

    let weather_lang =
        std::env::var("WEATHERVANE_WEATHER_LANG").unwrap_or_else(|_| "ru".to_string());

    let weather_timeout_secs = std::env::var("WEATHERVANE_WEATHER_TIMEOUT_SECS")
        .unwrap_or_else(|_| "5".to_string())
        .parse()
        .unwrap_or(5);

    Ok(Config {
        listen_addr,
        weather_listen_addr,
        debug,
        ip_providers,
        race_attempt_timeout_secs,
        race_overall_timeout_secs,
        race_workers,
        geo_api_url,
        geo_api_token,
        geo_timeout_secs,
        weather_hop_url,
        weather_api_url,
        weather_api_key,
        weather_lang,
        weather_timeout_secs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.listen_addr, "0.0.0.0:7999");
        assert_eq!(cfg.weather_listen_addr, "0.0.0.0:8002");
        assert!(!cfg.debug);
        assert!(cfg.ip_providers.is_empty());
        assert_eq!(cfg.race_workers, 3);
        assert_eq!(cfg.weather_lang, "ru");
    }

    #[test]
    fn test_load_config_defaults() {
        std::env::remove_var("WEATHERVANE_LISTEN_ADDR");
        std::env::remove_var("WEATHERVANE_RACE_WORKERS");

        let cfg = load_config().unwrap();
        assert_eq!(cfg.listen_addr, "0.0.0.0:7999");
        assert_eq!(cfg.race_attempt_timeout_secs, 3);
        assert_eq!(cfg.race_overall_timeout_secs, 5);
    }

    #[test]
    fn test_load_config_with_custom_listen_addr() {
        std::env::set_var("WEATHERVANE_LISTEN_ADDR", "127.0.0.1:9000");
        let cfg = load_config().unwrap();
        assert_eq!(cfg.listen_addr, "127.0.0.1:9000");
        std::env::remove_var("WEATHERVANE_LISTEN_ADDR");
    }

    #[test]
    fn test_load_config_with_provider_list() {
        std::env::set_var(
            "WEATHERVANE_IP_PROVIDERS",
            "https://api.ipify.org, https://icanhazip.com ,",
        );
        let cfg = load_config().unwrap();
        assert_eq!(
            cfg.ip_providers,
            vec![
                "https://api.ipify.org".to_string(),
                "https://icanhazip.com".to_string()
            ]
        );
        std::env::remove_var("WEATHERVANE_IP_PROVIDERS");
    }

    #[test]
    fn test_load_config_with_race_settings() {
        std::env::set_var("WEATHERVANE_RACE_ATTEMPT_TIMEOUT_SECS", "2");
        std::env::set_var("WEATHERVANE_RACE_OVERALL_TIMEOUT_SECS", "4");
        std::env::set_var("WEATHERVANE_RACE_WORKERS", "5");
        let cfg = load_config().unwrap();
        assert_eq!(cfg.race_attempt_timeout(), Duration::from_secs(2));
        assert_eq!(cfg.race_overall_timeout(), Duration::from_secs(4));
        assert_eq!(cfg.race_workers, 5);
        std::env::remove_var("WEATHERVANE_RACE_ATTEMPT_TIMEOUT_SECS");
        std::env::remove_var("WEATHERVANE_RACE_OVERALL_TIMEOUT_SECS");
        std::env::remove_var("WEATHERVANE_RACE_WORKERS");
    }

    #[test]
    fn test_load_config_with_geo_settings() {
        std::env::set_var("WEATHERVANE_GEO_API_URL", "http://localhost:1234/geo");
        std::env::set_var("WEATHERVANE_GEO_API_TOKEN", "secret");
        let cfg = load_config().unwrap();
        assert_eq!(cfg.geo_api_url, "http://localhost:1234/geo");
        assert_eq!(cfg.geo_api_token, "secret");
        std::env::remove_var("WEATHERVANE_GEO_API_URL");
        std::env::remove_var("WEATHERVANE_GEO_API_TOKEN");
    }

    #[test]
    fn test_load_config_with_weather_settings() {
        std::env::set_var("WEATHERVANE_WEATHER_HOP_URL", "http://weather:8002/api/weather");
        std::env::set_var("WEATHERVANE_WEATHER_API_KEY", "owm-key");
        std::env::set_var("WEATHERVANE_WEATHER_LANG", "en");
        let cfg = load_config().unwrap();
        assert_eq!(cfg.weather_hop_url, "http://weather:8002/api/weather");
        assert_eq!(cfg.weather_api_key, "owm-key");
        assert_eq!(cfg.weather_lang, "en");
        std::env::remove_var("WEATHERVANE_WEATHER_HOP_URL");
        std::env::remove_var("WEATHERVANE_WEATHER_API_KEY");
        std::env::remove_var("WEATHERVANE_WEATHER_LANG");
    }

    #[test]
    fn test_load_config_with_debug() {
        std::env::set_var("DEBUG", "1");
        let cfg = load_config().unwrap();
        assert!(cfg.debug);
        std::env::remove_var("DEBUG");
    }

    #[test]
    fn test_load_config_parse_error_uses_default() {
        std::env::set_var("WEATHERVANE_RACE_WORKERS", "not_a_number");
        let cfg = load_config().unwrap();
        assert_eq!(cfg.race_workers, 3); // default
        std::env::remove_var("WEATHERVANE_RACE_WORKERS");
    }

    #[test]
    fn test_config_clone() {
        let cfg = Config::default();
        let cloned = cfg.clone();
        assert_eq!(cfg.listen_addr, cloned.listen_addr);
        assert_eq!(cfg.weather_api_url, cloned.weather_api_url);
    }

    #[test]
    fn test_timeout_helpers() {
        let cfg = Config::default();
        assert_eq!(cfg.geo_timeout(), Duration::from_secs(5));
        assert_eq!(cfg.weather_timeout(), Duration::from_secs(5));
    }
}
