//! Lookup and write counters for the user cache

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Live counters, bumped by the facade under `&self`
#[derive(Debug, Default)]
pub(crate) struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    removals: AtomicU64,
}

impl Counters {
    pub(crate) fn hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn removal(&self) {
        self.removals.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            removals: self.removals.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn clear(&self) {
        for counter in [&self.hits, &self.misses, &self.inserts, &self.removals] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

/// Snapshot of the facade's cache activity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// `get` calls answered from the cache
    pub hits: u64,
    /// `get` calls that went to the store
    pub misses: u64,
    /// Users added to the cache by create or fetch-on-miss
    pub inserts: u64,
    /// Users dropped from the cache by delete
    pub removals: u64,
}

impl CacheStats {
    /// Total `get` calls
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Share of lookups served from the cache; 0.0 before any lookup
    pub fn hit_ratio(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }
}
