//! Domain matching: exact, or a single leading `*.` label.
//!
//! `*.example.com` matches both `example.com` and `sub.example.com`.
//! Any other wildcard placement in a domain pattern is unsupported and
//! yields no match. No punycode or IDN handling.

use crate::validator::{candidate_within_bounds, validate_pattern};

/// Match a domain pattern against a candidate hostname, case-insensitively.
#[must_use]
pub fn match_domain(pattern: &str, candidate: &str) -> bool {
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

    if let Some(base) = pat.strip_prefix("*.") {
        if base.is_empty() || base.contains('*') {
            return false;
        }
        // The bare base matches, and so does any label under it.
        if cand == base {
            return true;
        }
        return cand.len() > base.len() + 1
            && cand.ends_with(base)
            && cand.as_bytes()[cand.len() - base.len() - 1] == b'.';
    }

    false
}
