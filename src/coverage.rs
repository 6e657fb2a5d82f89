//! Coverage calculation over an asset population.
//!
//! [`calculate_scope_coverage`] runs the match engine once per asset and
//! aggregates the verdicts into per-type and overall statistics.
//! Classification is mutually exclusive and ordered: the exclusion check
//! precedes the target check, mirroring the engine's "exclusions win"
//! rule. Uncovered assets are derived from the other counters, never
//! incremented directly.
//!
//! [`CoverageEngine`] is the cache-aware front end the dashboard calls:
//! it owns a [`CoverageCache`] and serves repeat queries over the same
//! (by id-set) inputs from memory within the TTL window.

use tracing::debug;

use crate::cache::{coverage_cache_key, CacheStats, CoverageCache};
use crate::engine::scope_matches_for_asset;
use crate::types::{AssetProjection, ScopeCoverage, ScopeExclusion, ScopeTarget, TypeCoverage};

/// Compute coverage statistics for an asset population. Uncached.
#[must_use]
pub fn calculate_scope_coverage(
    assets: &[AssetProjection],
    targets: &[ScopeTarget],
    exclusions: &[ScopeExclusion],
) -> ScopeCoverage {
    let mut coverage = ScopeCoverage {
        total_assets: assets.len(),
        ..ScopeCoverage::default()
    };

    for asset in assets {
        let slot: &mut TypeCoverage = coverage
            .by_type
            .entry(asset.asset_type.clone())
            .or_default();
        slot.total += 1;

        let result = scope_matches_for_asset(asset, targets, exclusions);
        if result.is_excluded() {
            coverage.excluded_assets += 1;
            slot.excluded += 1;
        } else if !result.matched_targets.is_empty() {
            coverage.in_scope_assets += 1;
            slot.in_scope += 1;
        }
        // Neither matched: the asset lands in the derived uncovered count.
    }

    coverage.uncovered_assets =
        coverage.total_assets - coverage.in_scope_assets - coverage.excluded_assets;
    coverage.coverage_percent = percent(coverage.in_scope_assets, coverage.total_assets);
    coverage
}

/// Rounded percentage, 0 for an empty population.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u32
}

/// Cache-aware coverage calculator.
///
/// Owns its [`CoverageCache`]; construct with [`CoverageEngine::with_cache`]
/// to pick capacity and TTL. Single-threaded by design - wrap in a mutex
/// if shared across threads.
#[derive(Debug, Default)]
pub struct CoverageEngine {
    cache: CoverageCache,
}

impl CoverageEngine {
    /// Engine with the default cache (100 entries, 5 s TTL).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with an explicitly configured cache.
    #[must_use]
    pub fn with_cache(cache: CoverageCache) -> Self {
        Self { cache }
    }

    /// Coverage for the population, served from cache when the same
    /// (by id-set) inputs were computed within the TTL window.
    pub fn coverage(
        &mut self,
        assets: &[AssetProjection],
        targets: &[ScopeTarget],
        exclusions: &[ScopeExclusion],
    ) -> ScopeCoverage {
        let key = coverage_cache_key(assets, targets, exclusions);
        if let Some(cached) = self.cache.get(&key) {
            return cached;
        }

        debug!(assets = assets.len(), targets = targets.len(), "computing scope coverage");
        let result = calculate_scope_coverage(assets, targets, exclusions);
        self.cache.insert(key, result.clone());
        result
    }

    /// Empty the cache unconditionally (tests, forced-refresh actions).
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Cache hit/miss/eviction counters.
    #[must_use]
    pub const fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
