//! Cloud-account matching: case-normalized exact equality.
//!
//! Both sides are the synthesized `PROVIDER:accountId` form (the engine
//! builds the candidate from asset metadata). No wildcards: an account
//! boundary is matched whole or not at all.

use crate::validator::{candidate_within_bounds, validate_pattern};

/// Match a `provider:account_id` pattern against a candidate, uppercased.
#[must_use]
pub fn match_cloud_account(pattern: &str, candidate: &str) -> bool {
    let Ok(pattern) = validate_pattern(pattern) else {
        return false;
    };
    if !candidate_within_bounds(candidate) {
        return false;
    }
    pattern.to_uppercase() == candidate.to_uppercase()
}
