//! Persistent IP-to-carrier cache.
//!
//! A flat JSON object mapping IP strings to carrier short codes. Append-only
//! in practice: a carrier allocation does not change owners, so there is no
//! expiry. Every insert is persisted before the caller proceeds — registry
//! lookups are rate-limited, and losing a partial run's resolutions to a
//! crash is worse than the extra writes.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

use ipreq_core::Carrier;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read-then-write store the resolver consults before the network.
///
/// A trait rather than a concrete type so tests can pre-seed hits or reject
/// writes without touching a filesystem.
pub trait CarrierCache {
    fn get(&self, ip: &str) -> Option<Carrier>;
    fn insert(&mut self, ip: &str, carrier: Carrier) -> Result<(), CacheError>;
}

/// File-backed cache with write-through persistence.
pub struct FileCache {
    path: PathBuf,
    entries: HashMap<String, Carrier>,
}

impl FileCache {
    /// Load the cache from disk. A missing or corrupt file is an empty
    /// cache, never an error: the worst case is re-resolving.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, Carrier>>(&raw) {
                Ok(mut entries) => {
                    // Unknown must never survive in the cache; drop any
                    // entry a buggy or foreign writer left behind.
                    entries.retain(|_, carrier| carrier.is_cacheable());
                    entries
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "corrupt carrier cache, starting empty");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        debug!(path = %path.display(), entries = entries.len(), "loaded carrier cache");
        Self { path, entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) -> Result<(), CacheError> {
        let raw = serde_json::to_string(&self.entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl CarrierCache for FileCache {
    fn get(&self, ip: &str) -> Option<Carrier> {
        self.entries.get(ip).copied()
    }

    fn insert(&mut self, ip: &str, carrier: Carrier) -> Result<(), CacheError> {
        if !carrier.is_cacheable() {
            return Ok(());
        }
        self.entries.insert(ip.to_string(), carrier);
        self.persist()
    }
}
