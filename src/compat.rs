//! Target-type / asset-type compatibility table.
//!
//! The engine consults this table before dispatching to a matcher: an
//! incompatible pairing is an immediate non-match regardless of pattern
//! content. This is what keeps a `cloud_account` pattern from ever being
//! evaluated against a `website` asset even when the strings collide.
//!
//! Asset types are the host's plain strings; the table is the single
//! place that knows which of them each dialect may touch.

use crate::types::ScopeTargetType;

/// Asset-type strings a scope target type is eligible to match.
#[must_use]
pub const fn compatible_asset_types(target_type: ScopeTargetType) -> &'static [&'static str] {
    match target_type {
        ScopeTargetType::Domain => &["domain", "subdomain", "website", "api", "certificate", "email"],
        ScopeTargetType::Subdomain => &["subdomain", "website", "api"],
        ScopeTargetType::Certificate => &["certificate", "website"],
        ScopeTargetType::EmailDomain => &["email"],
        ScopeTargetType::IpAddress => &["ip", "host"],
        ScopeTargetType::IpRange => &["ip", "host"],
        ScopeTargetType::Repository => &["repository"],
        ScopeTargetType::CloudAccount => &["cloud_resource"],
        ScopeTargetType::Api => &["api"],
        ScopeTargetType::Website => &["website"],
        ScopeTargetType::Path => &["path"],
        ScopeTargetType::Container => &["container"],
        ScopeTargetType::Database => &["database"],
        ScopeTargetType::Host => &["host"],
    }
}

/// Returns true if `asset_type` is in the allowed set for `target_type`.
#[must_use]
pub fn is_compatible(target_type: ScopeTargetType, asset_type: &str) -> bool {
    compatible_asset_types(target_type)
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(asset_type))
}
