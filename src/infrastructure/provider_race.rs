//! Provider Race
//!
//! Races several public-IP lookup providers and takes the first response
//! that parses as a valid address.

use crate::domain::ports::PublicIpProvider;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Semaphore};

/// Race configuration.
#[derive(Debug, Clone)]
pub struct RaceConfig {
    /// Timeout for each individual provider attempt
    pub attempt_timeout: Duration,
    /// Hard ceiling for the whole race
    pub overall_timeout: Duration,
    /// Maximum providers queried at the same time
    pub max_workers: usize,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            attempt_timeout: Duration::from_secs(3),
            overall_timeout: Duration::from_secs(5),
            max_workers: 3,
        }
    }
}

/// Concurrent race over independent lookup providers.
///
/// All providers are dispatched under a bounded worker pool. The first
/// response whose body parses as an address wins, regardless of provider
/// order. Stragglers are left to finish or time out on their own schedule;
/// their results are simply never consumed. The race itself cannot fail:
/// exhausting every provider or the overall budget yields `None` and the
/// caller decides the fallback policy.
pub struct ProviderRace {
    providers: Vec<Arc<dyn PublicIpProvider>>,
    config: RaceConfig,
}

impl ProviderRace {
    /// Create a race over the given providers, in priority order.
    pub fn new(providers: Vec<Arc<dyn PublicIpProvider>>, config: RaceConfig) -> Self {
        Self { providers, config }
    }

    /// Number of providers in the race.
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Run the race to completion.
    ///
    /// Returns the first valid address, or `None` if every provider failed,
    /// answered garbage, or the overall budget expired.
    pub async fn run(&self) -> Option<IpAddr> {
        if self.providers.is_empty() {
            return None;
        }

        let (tx, mut rx) = mpsc::channel::<IpAddr>(self.providers.len());
        let workers = Arc::new(Semaphore::new(self.config.max_workers.max(1)));

        for provider in self.providers.iter().cloned() {
            let tx = tx.clone();
            let workers = workers.clone();
            let attempt_timeout = self.config.attempt_timeout;

            tokio::spawn(async move {
                let _permit = match workers.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return,
                };

                let body = match tokio::time::timeout(attempt_timeout, provider.fetch()).await {
                    Ok(Ok(body)) => body,
                    Ok(Err(e)) => {
                        tracing::debug!("provider {} failed: {:#}", provider.name(), e);
                        return;
                    }
                    Err(_) => {
                        tracing::debug!("provider {} timed out", provider.name());
                        return;
                    }
                };

                match body.trim().parse::<IpAddr>() {
                    Ok(ip) => {
                        // Receiver may already be gone if another provider won
                        let _ = tx.send(ip).await;
                    }
                    Err(_) => {
                        tracing::debug!("provider {} returned an unparsable body", provider.name());
                    }
                }
            });
        }

        // Drop the original sender so rx.recv() resolves to None once every
        // worker has finished without a valid answer.
        drop(tx);

        match tokio::time::timeout(self.config.overall_timeout, rx.recv()).await {
            Ok(Some(ip)) => {
                tracing::debug!("race won with {}", ip);
                Some(ip)
            }
            Ok(None) => {
                tracing::warn!("all public-IP providers failed");
                None
            }
            Err(_) => {
                tracing::warn!(
                    "public-IP race exceeded {:?} overall budget",
                    self.config.overall_timeout
                );
                None
            }
        }
    }
}
