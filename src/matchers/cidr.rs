//! IPv4 CIDR range containment.
//!
//! Parsing here is strict format checking, not general address parsing:
//! exactly four dot-separated decimal octets in `0..=255`, a prefix of
//! `0..=32` bits, and a hard input-length cap. Anything else is a
//! non-match. IPv6 is not supported.

use crate::validator::validate_pattern;

/// CIDR patterns and IP candidates are tiny; anything longer is garbage.
pub const MAX_CIDR_INPUT_LEN: usize = 50;

/// Parse a single decimal octet (`0..=255`), digits only.
fn parse_octet(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 3 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u32 = s.parse().ok()?;
    (value <= 255).then_some(value)
}

/// Parse a dotted-quad IPv4 address into its u32 form.
fn parse_ipv4(s: &str) -> Option<u32> {
    let mut addr = 0u32;
    let mut octets = 0usize;
    for part in s.split('.') {
        octets += 1;
        if octets > 4 {
            return None;
        }
        addr = (addr << 8) | parse_octet(part)?;
    }
    (octets == 4).then_some(addr)
}

/// Parse the prefix length (`0..=32`), digits only.
fn parse_prefix_bits(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let bits: u32 = s.parse().ok()?;
    (bits <= 32).then_some(bits)
}

/// Match an `a.b.c.d/bits` range pattern against a dotted-quad candidate.
///
/// Returns `false` for any malformed range, malformed candidate, or
/// oversized input. Never panics.
#[must_use]
pub fn match_cidr(pattern: &str, candidate: &str) -> bool {
    let Ok(pattern) = validate_pattern(pattern) else {
        return false;
    };
    let candidate = candidate.trim();
    if pattern.len() > MAX_CIDR_INPUT_LEN || candidate.len() > MAX_CIDR_INPUT_LEN {
        return false;
    }

    let Some((range, bits)) = pattern.split_once('/') else {
        return false;
    };
    let Some(bits) = parse_prefix_bits(bits) else {
        return false;
    };
    let (Some(range_addr), Some(candidate_addr)) = (parse_ipv4(range), parse_ipv4(candidate))
    else {
        return false;
    };

    let mask = if bits == 0 { 0 } else { u32::MAX << (32 - bits) };
    (range_addr & mask) == (candidate_addr & mask)
}
