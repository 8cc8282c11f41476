//! In-memory response cache with background expiry
//!
//! This module provides a cache that stores raw API response bodies keyed by
//! request URL. Entries are removed by a background reaper once they are older
//! than the configured interval; reads never check age themselves.

mod expiring;

pub use expiring::{CacheError, CachedData, ExpiringCache};
