//! Repository path matching: exact, `<prefix>/*`, or generic glob.
//!
//! `github.com/org/*` matches any path under `github.com/org/`. Patterns
//! that are neither exact nor trailing-`/*` fall back to the generic
//! wildcard matcher, so `github.com/*/infra` still works.

use crate::matchers::wildcard::match_wildcard;
use crate::validator::{candidate_within_bounds, validate_pattern};

/// Match a repository pattern against a candidate path, case-insensitively.
#[must_use]
pub fn match_repository(pattern: &str, candidate: &str) -> bool {
    let Ok(pattern) = validate_pattern(pattern) else {
        return false;
    };
    if !candidate_within_bounds(candidate) {
        return false;
    }

    let pat = pattern.to_lowercase();
    let cand = candidate.to_lowercase();

    if pat == cand {
        return true;
    }

    if pat.ends_with("/*") {
        // Strip only the `*`, keeping the slash in the prefix.
        return cand.starts_with(&pat[..pat.len() - 1]);
    }

    match_wildcard(&pat, &cand)
}
