//! Mutex Resolution Cache
//!
//! Implements ResolutionCache as a HashMap under one coarse mutex.

use crate::domain::entities::ResolutionEntry;
use crate::domain::ports::ResolutionCache;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::net::IpAddr;

/// In-memory resolution store.
///
/// One mutex guards every read-modify-write of the map; the lock is never
/// held across a network call, so two concurrent misses for the same key
/// may both resolve externally and both write (no single-flight - see the
/// port documentation). Entries live until the process exits.
///
/// Construct one instance per process and inject it where needed; tests
/// construct isolated instances per run.
pub struct MutexResolutionCache {
    entries: Mutex<HashMap<IpAddr, ResolutionEntry>>,
}

impl MutexResolutionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MutexResolutionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionCache for MutexResolutionCache {
    fn get(&self, key: &IpAddr) -> Option<ResolutionEntry> {
        self.entries.lock().get(key).cloned()
    }

    fn put(&self, key: IpAddr, entry: ResolutionEntry) {
        self.entries.lock().insert(key, entry);
    }

    fn len(&self) -> usize {
        self.entries.lock().len()
    }
}
