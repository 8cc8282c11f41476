//! Time-bounded cache for raw API responses
//!
//! Provides an `ExpiringCache` that keeps response bodies in memory and runs a
//! background reaper on the tokio runtime. The reaper wakes once per interval
//! and removes every entry older than that interval. Reads and writes never
//! trigger eviction, so a read just before a sweep may still see an entry that
//! is logically expired.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Errors that can occur when constructing a cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// The expiry interval must be non-zero
    #[error("Cache interval must be greater than zero")]
    ZeroInterval,

    /// The reaper needs a tokio runtime to run on
    #[error("Cache must be created from within a tokio runtime")]
    NoRuntime,
}

/// A stored payload and when it was inserted
#[derive(Debug, Clone)]
struct CacheEntry {
    data: Vec<u8>,
    /// Monotonic insertion time, used for expiry
    created_at: Instant,
    /// Wall-clock insertion time, for diagnostics
    cached_at: DateTime<Utc>,
}

/// Result of reading from the cache, including when the data was stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedData {
    /// The cached payload
    pub data: Vec<u8>,
    /// When the payload was stored
    pub cached_at: DateTime<Utc>,
}

type Entries = Arc<Mutex<HashMap<String, CacheEntry>>>;

/// Thread-safe key/value cache whose entries expire after a fixed interval
///
/// The interval is both the expiry age and the period of the background
/// sweep. An entry added at `t0` survives every sweep up to `t0 + interval`
/// and is removed by the first sweep after that, so it disappears somewhere
/// in `(t0 + interval, t0 + 2 * interval]`.
///
/// The reaper is stopped by [`ExpiringCache::shutdown`] or when the cache is
/// dropped.
pub struct ExpiringCache {
    entries: Entries,
    interval: Duration,
    cancel: CancellationToken,
    reaper: Mutex<Option<JoinHandle<()>>>,
}

impl ExpiringCache {
    /// Creates an empty cache and spawns its reaper on the current runtime
    ///
    /// # Arguments
    /// * `interval` - Expiry age and sweep period; must be non-zero
    ///
    /// # Returns
    /// * `Ok(ExpiringCache)` with the reaper running
    /// * `Err(CacheError)` if the interval is zero or no tokio runtime is active
    pub fn new(interval: Duration) -> Result<Self, CacheError> {
        if interval.is_zero() {
            return Err(CacheError::ZeroInterval);
        }
        let runtime = Handle::try_current().map_err(|_| CacheError::NoRuntime)?;

        let entries: Entries = Arc::new(Mutex::new(HashMap::new()));
        let cancel = CancellationToken::new();
        let reaper = runtime.spawn(reap_loop(entries.clone(), interval, cancel.clone()));

        debug!(interval_ms = interval.as_millis() as u64, "Cache reaper started");

        Ok(Self {
            entries,
            interval,
            cancel,
            reaper: Mutex::new(Some(reaper)),
        })
    }

    /// Inserts or replaces the entry for `key`, stamping it with the current time
    pub fn add(&self, key: impl Into<String>, data: impl Into<Vec<u8>>) {
        let entry = CacheEntry {
            data: data.into(),
            created_at: Instant::now(),
            cached_at: Utc::now(),
        };
        self.entries.lock().insert(key.into(), entry);
    }

    /// Returns a copy of the data stored under `key`, if present
    ///
    /// Age is not checked here; only the reaper removes entries.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.lock().get(key).map(|entry| entry.data.clone())
    }

    /// Returns the data stored under `key` together with its insertion time
    pub fn get_entry(&self, key: &str) -> Option<CachedData> {
        self.entries.lock().get(key).map(|entry| CachedData {
            data: entry.data.clone(),
            cached_at: entry.cached_at,
        })
    }

    /// Runs one sweep immediately, returning how many entries were removed
    pub fn reap_expired(&self) -> usize {
        sweep(&mut self.entries.lock(), self.interval, Instant::now())
    }

    /// Number of entries currently held, expired-but-unswept ones included
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` if the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// The configured expiry interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Stops the background reaper and waits for it to exit
    ///
    /// Calling this more than once is fine; later calls return immediately.
    /// The cache stays usable afterwards but entries are no longer reaped.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        let handle = self.reaper.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    warn!(error = %e, "Cache reaper exited abnormally");
                }
            }
        }
    }
}

impl Drop for ExpiringCache {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl fmt::Debug for ExpiringCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpiringCache")
            .field("interval", &self.interval)
            .field("len", &self.len())
            .field("reaping", &!self.cancel.is_cancelled())
            .finish()
    }
}

/// Removes every entry older than `interval` as of `now`
fn sweep(entries: &mut HashMap<String, CacheEntry>, interval: Duration, now: Instant) -> usize {
    let before = entries.len();
    entries.retain(|_, entry| now.saturating_duration_since(entry.created_at) <= interval);
    before - entries.len()
}

async fn reap_loop(entries: Entries, interval: Duration, cancel: CancellationToken) {
    let mut ticker = time::interval(interval);
    // Skip the first tick (immediate)
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let removed = sweep(&mut entries.lock(), interval, Instant::now());
                if removed > 0 {
                    debug!(removed, "Reaped expired cache entries");
                }
            }
            _ = cancel.cancelled() => {
                break;
            }
        }
    }

    debug!("Cache reaper stopped");
}
