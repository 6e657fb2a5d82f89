//! Generic `*`-glob matching without backtracking.
//!
//! The pattern is split on `*` into literal segments and the candidate
//! is walked left to right exactly once:
//!
//! - the first segment must anchor at position 0 unless the pattern
//!   starts with `*`;
//! - the last segment must anchor at the end unless the pattern ends
//!   with `*`;
//! - interior segments are located by a forward, non-overlapping
//!   substring search starting where the previous segment ended.
//!
//! The scan is deliberately non-recursive: a regex engine handed
//! `*a*a*a*a*...` can be driven into catastrophic backtracking, while
//! this walk is linear in the candidate length no matter what the
//! pattern looks like. The validator's wildcard cap bounds the constant.

use memchr::memmem;

use crate::validator::{candidate_within_bounds, validate_pattern};

/// Match a glob pattern against a candidate value, case-insensitively.
///
/// A pattern consisting only of wildcards matches any candidate.
/// Invalid or oversized inputs yield `false`.
#[must_use]
pub fn match_wildcard(pattern: &str, candidate: &str) -> bool {
    let Ok(pattern) = validate_pattern(pattern) else {
        return false;
    };
    if !candidate_within_bounds(candidate) {
        return false;
    }

    let pat = pattern.to_lowercase();
    let cand = candidate.to_lowercase();

    if !pat.contains('*') {
        return pat == cand;
    }

    let anchored_start = !pat.starts_with('*');
    let anchored_end = !pat.ends_with('*');
    let segments: Vec<&str> = pat.split('*').collect();

    if segments.iter().all(|s| s.is_empty()) {
        // Nothing but wildcards.
        return true;
    }

    let bytes = cand.as_bytes();
    let last = segments.len() - 1;
    let mut pos = 0usize;

    for (i, seg) in segments.iter().enumerate() {
        if seg.is_empty() {
            continue;
        }
        let seg = seg.as_bytes();

        if i == 0 && anchored_start {
            if !bytes.starts_with(seg) {
                return false;
            }
            pos = seg.len();
        } else if i == last && anchored_end {
            // Must fit after everything matched so far and reach the end.
            return bytes.len() >= pos + seg.len() && bytes.ends_with(seg);
        } else {
            match memmem::find(&bytes[pos..], seg) {
                Some(found) => pos += found + seg.len(),
                None => return false,
            }
        }
    }

    true
}
