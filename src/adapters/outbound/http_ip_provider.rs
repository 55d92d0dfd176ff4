//! HTTP Public IP Provider
//!
//! Implements PublicIpProvider over plain-text "what is my IP" endpoints.

use crate::domain::ports::PublicIpProvider;
use async_trait::async_trait;
use std::sync::Arc;

/// Plain-text HTTP lookup endpoint.
///
/// Issues a GET and returns the raw body; the racing layer decides whether
/// the body is a usable address.
pub struct HttpIpProvider {
    name: String,
    url: String,
    client: reqwest::Client,
}

impl HttpIpProvider {
    /// Create a provider for one endpoint.
    ///
    /// The client is shared so providers reuse one connection pool; the
    /// per-attempt timeout is enforced by the race, not here.
    pub fn new(name: impl Into<String>, url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            client,
        }
    }

    /// The well-known public endpoints raced by default.
    pub fn default_endpoints() -> Vec<(&'static str, &'static str)> {
        vec![
            ("ipify", "https://api.ipify.org"),
            ("aws-checkip", "https://checkip.amazonaws.com"),
            ("icanhazip", "https://icanhazip.com"),
            ("ifconfig-me", "https://ifconfig.me/ip"),
            ("ipinfo", "https://ipinfo.io/ip"),
        ]
    }

    /// Build providers from `name=url` style pairs parsed out of config,
    /// falling back to the default endpoint set when the list is empty.
    pub fn from_urls(urls: &[String], client: &reqwest::Client) -> Vec<Arc<dyn PublicIpProvider>> {
        if urls.is_empty() {
            return Self::default_endpoints()
                .into_iter()
                .map(|(name, url)| {
                    Arc::new(Self::new(name, url, client.clone())) as Arc<dyn PublicIpProvider>
                })
                .collect();
        }

        urls.iter()
            .map(|url| {
                let name = url
                    .trim_start_matches("https://")
                    .trim_start_matches("http://")
                    .split('/')
                    .next()
                    .unwrap_or(url)
                    .to_string();
                Arc::new(Self::new(name, url.clone(), client.clone())) as Arc<dyn PublicIpProvider>
            })
            .collect()
    }
}

#[async_trait]
impl PublicIpProvider for HttpIpProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> anyhow::Result<String> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
