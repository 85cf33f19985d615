// Cache regions and the tiered pair.
// A region is a named directory of TTL-stamped entries; the tiered cache
// pairs a short-term region with a long-term fallback region.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use super::store;

/// Short-term region TTL: 30 minutes.
pub const SHORT_TERM_TTL: Duration = Duration::from_secs(1800);

/// Long-term region TTL: 30 hours.
pub const LONG_TERM_TTL: Duration = Duration::from_secs(108_000);

/// One on-disk key-value region with a fixed TTL.
pub struct CacheRegion {
    name: String,
    dir: PathBuf,
    ttl: Duration,
}

impl CacheRegion {
    pub fn new(name: impl Into<String>, base_path: &Path, ttl: Duration) -> Self {
        let name = name.into();
        let dir = base_path.join(&name);
        Self { name, dir, ttl }
    }

    /// Region identifier, for log messages and diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a key. Absent, expired, and unreadable entries all read as a
    /// miss; caching is an optimization, so no failure escapes here.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = store::entry_path(&self.dir, key);
        match store::read_entry::<T>(&path) {
            Ok(Some(entry)) if !entry.is_expired() => {
                debug!(region = %self.name, key, "cache hit");
                Some(entry.value)
            }
            Ok(Some(_)) => {
                debug!(region = %self.name, key, "cache entry expired");
                None
            }
            Ok(None) => {
                debug!(region = %self.name, key, "cache miss");
                None
            }
            Err(err) => {
                debug!(region = %self.name, key, %err, "cache entry unreadable");
                None
            }
        }
    }

    /// Store a value, best-effort. Failures are logged and swallowed so a
    /// broken cache can never fail a retrieval.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) {
        let path = store::entry_path(&self.dir, key);
        if let Err(err) = store::write_entry(&path, value, self.ttl) {
            warn!(region = %self.name, key, %err, "cache write failed");
        }
    }

    /// Remove every entry in the region.
    pub fn clear(&self) {
        if self.dir.exists() {
            if let Err(err) = fs::remove_dir_all(&self.dir) {
                warn!(region = %self.name, %err, "cache clear failed");
            }
        }
    }
}

/// The two-tier cache: a freshness-preferring short-term region backed by an
/// availability-preferring long-term region.
pub struct TieredCache {
    short_term: CacheRegion,
    long_term: CacheRegion,
}

impl TieredCache {
    /// Build both regions under `base_path`, named `<base>` and
    /// `<base>-long-term`.
    pub fn new(base_name: &str, base_path: &Path) -> Self {
        Self {
            short_term: CacheRegion::new(base_name, base_path, SHORT_TERM_TTL),
            long_term: CacheRegion::new(
                format!("{base_name}-long-term"),
                base_path,
                LONG_TERM_TTL,
            ),
        }
    }

    pub fn short_term(&self) -> &CacheRegion {
        &self.short_term
    }

    pub fn long_term(&self) -> &CacheRegion {
        &self.long_term
    }

    /// Write a value through to both regions, each with its own TTL.
    pub fn store_both<T: Serialize>(&self, key: &str, value: &T) {
        self.short_term.put(key, value);
        self.long_term.put(key, value);
    }
}
