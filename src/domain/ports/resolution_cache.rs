//! Resolution Cache Port
//!
//! Defines the interface for memoizing public-address resolutions.

use crate::domain::entities::ResolutionEntry;
use std::net::IpAddr;

/// Store for completed public-address resolutions.
///
/// Keys are parsed addresses - callers must validate input before using it
/// as a key. Entries never expire; the cache lives for the process.
///
/// The cache does NOT deduplicate concurrent lookups for the same key: two
/// requests that miss at the same time may both resolve externally and both
/// store the converging result. Providers are idempotent, so this is
/// accepted duplicated work rather than a correctness problem.
pub trait ResolutionCache: Send + Sync {
    /// Look up a stored resolution for an input address.
    fn get(&self, key: &IpAddr) -> Option<ResolutionEntry>;

    /// Store a resolution for an input address.
    fn put(&self, key: IpAddr, entry: ResolutionEntry);

    /// Number of stored resolutions.
    #[allow(dead_code)]
    fn len(&self) -> usize;

    /// Whether the cache holds no entries.
    #[allow(dead_code)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
