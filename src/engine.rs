//! Scope match engine: one asset against the full rule set.
//!
//! The engine performs the following steps, in order, for each rule:
//!
//! 1. **Pattern validation** - malformed or abusive patterns are a
//!    non-match, never an error
//! 2. **Type compatibility** - the asset's type must be in the allowed
//!    set for the target's type (see [`crate::compat`])
//! 3. **Candidate derivation** - pick the asset's matchable string for
//!    this dialect, preferring `name` with metadata fallbacks
//! 4. **Dialect dispatch** - hand pattern and candidate to the matcher
//!    for the target's type and tag how the match was achieved
//!
//! Per-asset evaluation collects *every* matching target (no
//! short-circuit - the dashboard shows all of them), then every matching
//! exclusion. Exclusions always win: any exclusion match forces the
//! asset out of scope regardless of how many targets matched.

use smallvec::SmallVec;
use std::borrow::Cow;
use tracing::trace;

use crate::compat::is_compatible;
use crate::matchers::{
    contains_wildcard, match_cidr, match_cloud_account, match_domain, match_repository,
    match_wildcard,
};
use crate::types::{
    AssetProjection, ExclusionMatch, MatchType, ScopeExclusion, ScopeMatchResult, ScopeTarget,
    ScopeTargetType, TargetMatch,
};
use crate::validator::validate_pattern;

/// Outcome of matching one target against one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchVerdict {
    /// Whether the target's pattern matched the asset.
    pub matches: bool,
    /// How the match was achieved. `None` when `matches` is false.
    pub match_type: Option<MatchType>,
}

impl MatchVerdict {
    /// The non-matching verdict.
    #[inline]
    #[must_use]
    pub const fn no_match() -> Self {
        Self {
            matches: false,
            match_type: None,
        }
    }

    /// A matching verdict with its tag.
    #[inline]
    #[must_use]
    pub const fn matched(match_type: MatchType) -> Self {
        Self {
            matches: true,
            match_type: Some(match_type),
        }
    }
}

/// Cheap shape check for a dotted-quad candidate. Full strict parsing
/// lives in the CIDR matcher; this only decides which asset field is
/// the natural candidate for IP dialects.
fn looks_like_ipv4(s: &str) -> bool {
    let mut groups = 0usize;
    for part in s.split('.') {
        groups += 1;
        if groups > 4 || part.is_empty() || part.len() > 3 {
            return false;
        }
        if !part.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
    }
    groups == 4
}

/// Derive the asset's matchable string for a target type.
///
/// `name` is preferred; the type-specific metadata field is the fallback
/// when the name is empty or (for IP dialects) not an address. Cloud
/// accounts are special: the candidate is the synthesized
/// `provider:account_id` form.
fn candidate_for<'a>(
    target_type: ScopeTargetType,
    asset: &'a AssetProjection,
) -> Option<Cow<'a, str>> {
    let name = asset.name.trim();

    match target_type {
        ScopeTargetType::Domain
        | ScopeTargetType::Subdomain
        | ScopeTargetType::Certificate
        | ScopeTargetType::EmailDomain => {
            if !name.is_empty() {
                return Some(Cow::Borrowed(name));
            }
            asset.metadata_str("domain").map(Cow::Borrowed)
        }
        ScopeTargetType::IpAddress | ScopeTargetType::IpRange => {
            if looks_like_ipv4(name) {
                return Some(Cow::Borrowed(name));
            }
            asset.metadata_str("ip").map(Cow::Borrowed)
        }
        ScopeTargetType::Repository => {
            if !name.is_empty() {
                return Some(Cow::Borrowed(name));
            }
            asset.metadata_str("repository").map(Cow::Borrowed)
        }
        ScopeTargetType::CloudAccount => {
            // Already-synthesized names pass through untouched.
            if name.contains(':') {
                return Some(Cow::Borrowed(name));
            }
            let provider = asset.metadata_str("provider")?;
            let account = asset
                .metadata_str("account_id")
                .unwrap_or(name);
            if account.is_empty() {
                return None;
            }
            Some(Cow::Owned(format!("{provider}:{account}")))
        }
        ScopeTargetType::Host => {
            if !name.is_empty() {
                return Some(Cow::Borrowed(name));
            }
            asset.metadata_str("host").map(Cow::Borrowed)
        }
        ScopeTargetType::Api
        | ScopeTargetType::Website
        | ScopeTargetType::Path
        | ScopeTargetType::Container
        | ScopeTargetType::Database => {
            if name.is_empty() {
                return None;
            }
            Some(Cow::Borrowed(name))
        }
    }
}

/// Match one rule (target or exclusion - they share pattern semantics)
/// against one asset.
fn matches_rule(
    target_type: ScopeTargetType,
    raw_pattern: &str,
    asset: &AssetProjection,
) -> MatchVerdict {
    let Ok(pattern) = validate_pattern(raw_pattern) else {
        return MatchVerdict::no_match();
    };

    if !is_compatible(target_type, &asset.asset_type) {
        return MatchVerdict::no_match();
    }

    let Some(candidate) = candidate_for(target_type, asset) else {
        return MatchVerdict::no_match();
    };

    let matched = match target_type {
        ScopeTargetType::Domain
        | ScopeTargetType::Subdomain
        | ScopeTargetType::Certificate
        | ScopeTargetType::EmailDomain => match_domain(pattern, &candidate),
        ScopeTargetType::IpRange => match_cidr(pattern, &candidate),
        ScopeTargetType::Repository => match_repository(pattern, &candidate),
        ScopeTargetType::CloudAccount => match_cloud_account(pattern, &candidate),
        ScopeTargetType::IpAddress
        | ScopeTargetType::Api
        | ScopeTargetType::Website
        | ScopeTargetType::Path
        | ScopeTargetType::Container
        | ScopeTargetType::Database
        | ScopeTargetType::Host => match_wildcard(pattern, &candidate),
    };

    if !matched {
        return MatchVerdict::no_match();
    }

    let match_type = match target_type {
        ScopeTargetType::IpRange => MatchType::Cidr,
        _ if contains_wildcard(pattern) => MatchType::Wildcard,
        _ => MatchType::Exact,
    };
    MatchVerdict::matched(match_type)
}

/// Match a single target against a single asset.
///
/// Total: invalid patterns, incompatible type pairings, and underivable
/// candidates all yield [`MatchVerdict::no_match`]. Never panics.
#[must_use]
pub fn matches_scope_target(target: &ScopeTarget, asset: &AssetProjection) -> MatchVerdict {
    matches_rule(target.target_type, &target.pattern, asset)
}

/// Evaluate one asset against all active targets and exclusions.
///
/// Every matching target is collected (an asset may match several rules;
/// the first hit does not end the walk), then every matching exclusion.
/// `in_scope` is true iff at least one target matched and no exclusion
/// did.
#[must_use]
pub fn scope_matches_for_asset(
    asset: &AssetProjection,
    targets: &[ScopeTarget],
    exclusions: &[ScopeExclusion],
) -> ScopeMatchResult {
    let mut matched_targets: SmallVec<[TargetMatch; 4]> = SmallVec::new();
    for target in targets.iter().filter(|t| t.status.is_active()) {
        let verdict = matches_scope_target(target, asset);
        if let Some(match_type) = verdict.match_type {
            matched_targets.push(TargetMatch {
                target_id: target.id.clone(),
                pattern: target.pattern.clone(),
                match_type,
            });
        }
    }

    let mut matched_exclusions: SmallVec<[ExclusionMatch; 2]> = SmallVec::new();
    for exclusion in exclusions.iter().filter(|e| e.status.is_active()) {
        if matches_rule(exclusion.target_type, &exclusion.pattern, asset).matches {
            matched_exclusions.push(ExclusionMatch {
                exclusion_id: exclusion.id.clone(),
                pattern: exclusion.pattern.clone(),
                reason: exclusion.reason.clone(),
            });
        }
    }

    let in_scope = !matched_targets.is_empty() && matched_exclusions.is_empty();
    trace!(
        asset = %asset.id,
        targets = matched_targets.len(),
        exclusions = matched_exclusions.len(),
        in_scope,
        "scope evaluation"
    );

    ScopeMatchResult {
        asset_id: asset.id.clone(),
        asset_name: asset.name.clone(),
        asset_type: asset.asset_type.clone(),
        matched_targets: matched_targets.into_vec(),
        matched_exclusions: matched_exclusions.into_vec(),
        in_scope,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TargetStatus;
    use serde_json::json;

    fn target(id: &str, ty: ScopeTargetType, pattern: &str) -> ScopeTarget {
        ScopeTarget {
            id: id.to_string(),
            target_type: ty,
            pattern: pattern.to_string(),
            status: TargetStatus::Active,
        }
    }

    fn exclusion(id: &str, ty: ScopeTargetType, pattern: &str, reason: &str) -> ScopeExclusion {
        ScopeExclusion {
            id: id.to_string(),
            target_type: ty,
            pattern: pattern.to_string(),
            status: TargetStatus::Active,
            reason: reason.to_string(),
        }
    }

    fn asset(id: &str, ty: &str, name: &str) -> AssetProjection {
        AssetProjection {
            id: id.to_string(),
            asset_type: ty.to_string(),
            name: name.to_string(),
            metadata: std::collections::HashMap::new(),
        }
    }

    #[test]
    fn domain_target_matches_website_asset() {
        let t = target("t1", ScopeTargetType::Domain, "*.acme.com");
        let a = asset("a1", "website", "api.acme.com");
        let verdict = matches_scope_target(&t, &a);
        assert!(verdict.matches);
        assert_eq!(verdict.match_type, Some(MatchType::Wildcard));
    }

    #[test]
    fn exact_match_is_tagged_exact() {
        let t = target("t1", ScopeTargetType::Website, "portal.acme.com");
        let a = asset("a1", "website", "portal.acme.com");
        assert_eq!(
            matches_scope_target(&t, &a),
            MatchVerdict::matched(MatchType::Exact)
        );
    }

    #[test]
    fn ip_range_match_is_tagged_cidr() {
        let t = target("t1", ScopeTargetType::IpRange, "10.0.0.0/8");
        let a = asset("a1", "ip", "10.1.2.3");
        assert_eq!(
            matches_scope_target(&t, &a),
            MatchVerdict::matched(MatchType::Cidr)
        );
    }

    #[test]
    fn incompatible_type_is_an_immediate_non_match() {
        // Same string, wrong asset type: the table blocks dispatch.
        let t = target("t1", ScopeTargetType::CloudAccount, "aws:123456789012");
        let mut a = asset("a1", "website", "aws:123456789012");
        assert_eq!(matches_scope_target(&t, &a), MatchVerdict::no_match());

        a.asset_type = "cloud_resource".to_string();
        assert!(matches_scope_target(&t, &a).matches);
    }

    #[test]
    fn invalid_pattern_is_a_non_match() {
        let t = target("t1", ScopeTargetType::Domain, &"*a".repeat(11));
        let a = asset("a1", "website", "a.acme.com");
        assert_eq!(matches_scope_target(&t, &a), MatchVerdict::no_match());
    }

    #[test]
    fn ip_metadata_fallback_for_host_assets() {
        let t = target("t1", ScopeTargetType::IpRange, "10.0.0.0/8");
        let mut a = asset("a1", "host", "db-1.internal");
        a.metadata
            .insert("ip".to_string(), json!("10.3.4.5"));
        assert!(matches_scope_target(&t, &a).matches);

        // Without metadata the hostname is not an address: no match.
        let bare = asset("a2", "host", "db-2.internal");
        assert!(!matches_scope_target(&t, &bare).matches);
    }

    #[test]
    fn cloud_candidate_is_synthesized_from_metadata() {
        let t = target("t1", ScopeTargetType::CloudAccount, "aws:123456789012");
        let mut a = asset("a1", "cloud_resource", "123456789012");
        a.metadata
            .insert("provider".to_string(), json!("aws"));
        assert!(matches_scope_target(&t, &a).matches);

        // No provider, no synthesized candidate.
        let bare = asset("a2", "cloud_resource", "123456789012");
        assert!(!matches_scope_target(&t, &bare).matches);
    }

    #[test]
    fn all_matching_targets_are_collected() {
        let targets = vec![
            target("t1", ScopeTargetType::Domain, "*.acme.com"),
            target("t2", ScopeTargetType::Website, "api.acme.com"),
            target("t3", ScopeTargetType::Domain, "*.other.com"),
        ];
        let a = asset("a1", "website", "api.acme.com");
        let result = scope_matches_for_asset(&a, &targets, &[]);
        assert_eq!(result.matched_targets.len(), 2);
        assert!(result.in_scope);
    }

    #[test]
    fn inactive_rules_are_skipped() {
        let mut t = target("t1", ScopeTargetType::Domain, "*.acme.com");
        t.status = TargetStatus::Inactive;
        let a = asset("a1", "website", "api.acme.com");
        let result = scope_matches_for_asset(&a, &[t], &[]);
        assert!(result.matched_targets.is_empty());
        assert!(!result.in_scope);
    }

    #[test]
    fn exclusions_always_win() {
        let targets = vec![target("t1", ScopeTargetType::Domain, "*.acme.com")];
        let exclusions = vec![exclusion(
            "e1",
            ScopeTargetType::Domain,
            "status.acme.com",
            "third-party",
        )];
        let a = asset("a1", "website", "status.acme.com");
        let result = scope_matches_for_asset(&a, &targets, &exclusions);
        assert_eq!(result.matched_targets.len(), 1);
        assert_eq!(result.matched_exclusions.len(), 1);
        assert!(!result.in_scope);
        assert!(result.is_excluded());
    }

    #[test]
    fn no_target_match_means_out_of_scope() {
        let targets = vec![target("t1", ScopeTargetType::Domain, "*.acme.com")];
        let a = asset("a1", "website", "api.unrelated.io");
        let result = scope_matches_for_asset(&a, &targets, &[]);
        assert!(!result.in_scope);
        assert!(!result.is_excluded());
    }

    #[test]
    fn in_scope_invariant_holds() {
        let targets = vec![target("t1", ScopeTargetType::Domain, "*.acme.com")];
        let exclusions = vec![exclusion(
            "e1",
            ScopeTargetType::Domain,
            "*.acme.com",
            "everything excluded",
        )];
        for name in ["api.acme.com", "other.io"] {
            let a = asset("a1", "website", name);
            let r = scope_matches_for_asset(&a, &targets, &exclusions);
            assert_eq!(
                r.in_scope,
                !r.matched_targets.is_empty() && r.matched_exclusions.is_empty()
            );
        }
    }
}
