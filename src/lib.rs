// Forbid unsafe code in production, but allow in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
//! Scope matching and coverage engine.
//!
//! This library decides, for every discovered asset, whether it falls
//! inside an organization's declared assessment boundary ("in scope"),
//! accounting for explicit exclusions, and aggregates the per-asset
//! verdicts into the coverage statistics the dashboard reports.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Coverage Engine                          │
//! │        (cache-aware front end, owns the result cache)        │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Scope Match Engine                         │
//! │   validate → type compatibility → candidate → dispatch       │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Type Matchers                           │
//! │  ┌──────────┐ ┌──────┐ ┌────────┐ ┌────────────┐ ┌───────┐  │
//! │  │ wildcard │ │ cidr │ │ domain │ │ repository │ │ cloud │  │
//! │  └──────────┘ └──────┘ └────────┘ └────────────┘ └───────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is purely synchronous and does no I/O: callers hand it
//! in-memory targets, exclusions, and asset projections and get plain
//! result records back. All failure modes (malformed patterns, garbage
//! candidates, oversized inputs) degrade to "no match" - the
//! conservative default for a security boundary.
//!
//! # Usage
//!
//! ```
//! use scope_engine::{
//!     AssetProjection, CoverageEngine, ScopeTarget, ScopeTargetType, TargetStatus,
//! };
//!
//! let targets = vec![ScopeTarget {
//!     id: "t1".to_string(),
//!     target_type: ScopeTargetType::Domain,
//!     pattern: "*.acme.com".to_string(),
//!     status: TargetStatus::Active,
//! }];
//! let assets = vec![AssetProjection {
//!     id: "a1".to_string(),
//!     asset_type: "website".to_string(),
//!     name: "api.acme.com".to_string(),
//!     metadata: Default::default(),
//! }];
//!
//! let mut engine = CoverageEngine::new();
//! let coverage = engine.coverage(&assets, &targets, &[]);
//! assert_eq!(coverage.coverage_percent, 100);
//! ```

pub mod cache;
pub mod compat;
pub mod coverage;
pub mod engine;
pub mod format;
pub mod matchers;
pub mod types;
pub mod validator;

// Re-export the public surface at the crate root.
pub use cache::{coverage_cache_key, CacheStats, CoverageCache, DEFAULT_CAPACITY, DEFAULT_TTL};
pub use compat::{compatible_asset_types, is_compatible};
pub use coverage::{calculate_scope_coverage, CoverageEngine};
pub use engine::{matches_scope_target, scope_matches_for_asset, MatchVerdict};
pub use format::format_scope_match;
pub use matchers::{
    contains_wildcard, match_cidr, match_cloud_account, match_domain, match_repository,
    match_wildcard,
};
pub use types::{
    AssetProjection, ExclusionMatch, MatchType, ScopeCoverage, ScopeExclusion, ScopeMatchResult,
    ScopeTarget, ScopeTargetType, TargetMatch, TargetStatus, TypeCoverage,
};
pub use validator::{
    validate_pattern, PatternRejection, MAX_CANDIDATE_LEN, MAX_PATTERN_LEN, MAX_WILDCARDS,
};
