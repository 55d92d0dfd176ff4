//! IP Resolver - Public-address resolution use case
//!
//! Composes the address classifier, the resolution cache and the provider
//! race into one total operation: every input yields some address.

use crate::domain::entities::{ResolutionEntry, ResolutionSource};
use crate::domain::ports::ResolutionCache;
use crate::domain::services::AddressClassifier;
use crate::infrastructure::ProviderRace;
use std::net::IpAddr;
use std::sync::Arc;

/// Resolver from a client-supplied address to an effective public address.
///
/// `resolve` cannot fail:
/// 1. Public input is returned as-is - no cache, no network.
/// 2. Reserved input is answered from the cache when possible.
/// 3. Otherwise the provider race runs and its answer is cached.
/// 4. A lost race falls back to the original input unchanged - the lookup
///    is advisory and must never block a request or raise an error.
pub struct IpResolver {
    cache: Arc<dyn ResolutionCache>,
    race: Arc<ProviderRace>,
}

impl IpResolver {
    /// Create a resolver over an injected cache and race.
    pub fn new(cache: Arc<dyn ResolutionCache>, race: Arc<ProviderRace>) -> Self {
        Self { cache, race }
    }

    /// Resolve a client address to a public one. Total - always returns an
    /// entry, falling back to the input itself.
    pub async fn resolve(&self, client_address: &str) -> ResolutionEntry {
        let trimmed = client_address.trim();

        match trimmed.parse::<IpAddr>() {
            Ok(ip) if AddressClassifier::classify_ip(ip).is_public() => {
                tracing::debug!("address {} already public", trimmed);
                ResolutionEntry::direct(trimmed)
            }
            Ok(ip) => self.resolve_reserved(trimmed, Some(ip)).await,
            Err(_) => {
                // Unparsable values are never trusted and never cached,
                // but they still get a resolution attempt.
                tracing::warn!("unparsable client address {:?}", trimmed);
                self.resolve_reserved(trimmed, None).await
            }
        }
    }

    /// Resolve a non-public input, using the cache only when the input was
    /// a syntactically valid address.
    async fn resolve_reserved(&self, input: &str, cache_key: Option<IpAddr>) -> ResolutionEntry {
        if let Some(key) = cache_key {
            if let Some(cached) = self.cache.get(&key) {
                tracing::debug!("cache hit for {}: {}", input, cached.resolved);
                return ResolutionEntry::new(input, cached.resolved, ResolutionSource::Cache);
            }
        }

        match self.race.run().await {
            Some(public_ip) => {
                let entry = ResolutionEntry::new(
                    input,
                    public_ip.to_string(),
                    ResolutionSource::ExternalService,
                );
                if let Some(key) = cache_key {
                    self.cache.put(key, entry.clone());
                }
                tracing::info!("resolved {} -> {} via external race", input, public_ip);
                entry
            }
            None => {
                tracing::warn!("race produced no answer, keeping {} unchanged", input);
                ResolutionEntry::direct(input)
            }
        }
    }
}
