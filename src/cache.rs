//! Bounded, TTL-expiring cache for coverage results.
//!
//! The cache is an explicit object with capacity and TTL as constructor
//! parameters - lifecycle is owned by whoever owns the
//! [`crate::coverage::CoverageEngine`], not ambient process state. It is
//! not internally synchronized: callers on a multithreaded runtime must
//! serialize access themselves.
//!
//! Keys are built from the identity of the three input collections: the
//! id lists are independently sorted and concatenated, so the order of
//! the inputs does not affect cache identity, but membership does.
//!
//! Eviction at capacity removes the oldest *inserted* entry (FIFO). This
//! reproduces the known insertion-order approximation of LRU rather than
//! tracking recency of use; eviction policy is not part of any
//! documented guarantee, and the worst case is a redundant recompute.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::types::{AssetProjection, ScopeCoverage, ScopeExclusion, ScopeTarget};

/// Default maximum number of cached coverage results.
pub const DEFAULT_CAPACITY: usize = 100;

/// Default freshness window for a cached result.
pub const DEFAULT_TTL: Duration = Duration::from_millis(5000);

/// Counters for observing cache behavior.
///
/// `misses` counts both absent keys and expired entries; `expirations`
/// is the expired subset. Tests use these to verify idempotence without
/// timing games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
}

#[derive(Debug)]
struct CacheEntry {
    result: ScopeCoverage,
    stored_at: Instant,
}

/// Insertion-order-bounded, TTL-expiring map of coverage results.
#[derive(Debug)]
pub struct CoverageCache {
    capacity: usize,
    ttl: Duration,
    entries: HashMap<String, CacheEntry>,
    order: VecDeque<String>,
    stats: CacheStats,
}

impl Default for CoverageCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TTL)
    }
}

impl CoverageCache {
    /// Create a cache holding at most `capacity` entries, each fresh for
    /// `ttl`.
    #[must_use]
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            capacity: capacity.max(1),
            ttl,
            entries: HashMap::new(),
            order: VecDeque::new(),
            stats: CacheStats::default(),
        }
    }

    /// Look up a fresh entry, expiring a stale one on the way.
    pub fn get(&mut self, key: &str) -> Option<ScopeCoverage> {
        let fresh = match self.entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.result.clone()),
            Some(_) => None, // present but stale
            None => {
                self.stats.misses += 1;
                return None;
            }
        };

        if let Some(result) = fresh {
            self.stats.hits += 1;
            trace!(key, "coverage cache hit");
            return Some(result);
        }

        self.remove(key);
        self.stats.expirations += 1;
        self.stats.misses += 1;
        trace!(key, "coverage cache entry expired");
        None
    }

    /// Store a result, evicting the oldest-inserted entry when full.
    pub fn insert(&mut self, key: String, result: ScopeCoverage) {
        if let Some(entry) = self.entries.get_mut(&key) {
            // Replace in place; the key keeps its insertion-order slot.
            entry.result = result;
            entry.stored_at = Instant::now();
            return;
        }

        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                self.stats.evictions += 1;
                debug!(key = %oldest, "coverage cache eviction");
            }
        }

        self.order.push_back(key.clone());
        self.entries.insert(
            key,
            CacheEntry {
                result,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop every entry unconditionally. Counters survive.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Number of stored entries (fresh or not).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Observed hit/miss/eviction counters.
    #[must_use]
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
        if let Some(idx) = self.order.iter().position(|k| k == key) {
            self.order.remove(idx);
        }
    }
}

/// Build the cache key for a coverage computation.
///
/// Each collection's ids are sorted independently, so input ordering is
/// irrelevant to cache identity while membership is not.
#[must_use]
pub fn coverage_cache_key(
    assets: &[AssetProjection],
    targets: &[ScopeTarget],
    exclusions: &[ScopeExclusion],
) -> String {
    fn sorted_ids<'a>(ids: impl Iterator<Item = &'a str>) -> String {
        let mut ids: Vec<&str> = ids.collect();
        ids.sort_unstable();
        ids.join(",")
    }

    let assets = sorted_ids(assets.iter().map(|a| a.id.as_str()));
    let targets = sorted_ids(targets.iter().map(|t| t.id.as_str()));
    let exclusions = sorted_ids(exclusions.iter().map(|e| e.id.as_str()));
    format!("{assets}|{targets}|{exclusions}")
}
