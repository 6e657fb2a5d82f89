//! Pattern matchers, one per dialect.
//!
//! All matchers are pure, case-insensitive, and total: they return a
//! boolean on any input shape and never panic. Malformed patterns,
//! malformed candidates, and oversized inputs all yield `false` — the
//! conservative answer for a security boundary is always "not in scope".
//!
//! None of the matchers are regex-based. The wildcard matcher is a
//! greedy, anchor-aware linear scan with no backtracking, so adversarial
//! patterns cannot force superlinear cost (see [`wildcard`]).

pub mod cidr;
pub mod cloud;
pub mod domain;
pub mod repository;
pub mod wildcard;

pub use cidr::match_cidr;
pub use cloud::match_cloud_account;
pub use domain::match_domain;
pub use repository::match_repository;
pub use wildcard::match_wildcard;

/// Returns true if the pattern contains at least one `*` token.
///
/// Used by the engine to tag successful matches as `wildcard` rather
/// than `exact`.
#[inline]
#[must_use]
pub fn contains_wildcard(pattern: &str) -> bool {
    pattern.contains('*')
}
