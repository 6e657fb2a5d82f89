//! Core data model for scope matching and coverage.
//!
//! These are the boundary types exchanged with the host dashboard's data
//! layer. The engine consumes targets, exclusions, and asset projections
//! read-only and produces match results and coverage reports; it never
//! persists anything itself.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// The pattern dialect a scope target speaks.
///
/// Each variant selects a matcher and, via [`crate::compat`], the set of
/// asset types the target is allowed to match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeTargetType {
    Domain,
    Subdomain,
    Certificate,
    EmailDomain,
    IpAddress,
    IpRange,
    Repository,
    CloudAccount,
    Api,
    Website,
    Path,
    Container,
    Database,
    Host,
}

impl ScopeTargetType {
    /// Human-readable label, matching the wire form.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Subdomain => "subdomain",
            Self::Certificate => "certificate",
            Self::EmailDomain => "email_domain",
            Self::IpAddress => "ip_address",
            Self::IpRange => "ip_range",
            Self::Repository => "repository",
            Self::CloudAccount => "cloud_account",
            Self::Api => "api",
            Self::Website => "website",
            Self::Path => "path",
            Self::Container => "container",
            Self::Database => "database",
            Self::Host => "host",
        }
    }
}

/// Whether a rule participates in matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetStatus {
    /// Rule is live and evaluated against assets.
    #[default]
    Active,
    /// Rule is retained but skipped by the engine.
    Inactive,
}

impl TargetStatus {
    /// Returns true if the rule should be evaluated.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// An in-scope rule: assets matching `pattern` are inside the
/// assessment boundary (unless an exclusion also matches).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeTarget {
    pub id: String,
    #[serde(rename = "type")]
    pub target_type: ScopeTargetType,
    pub pattern: String,
    #[serde(default)]
    pub status: TargetStatus,
}

/// An override rule: assets matching `pattern` are removed from scope
/// even when a target matched them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeExclusion {
    pub id: String,
    #[serde(rename = "type")]
    pub target_type: ScopeTargetType,
    pub pattern: String,
    #[serde(default)]
    pub status: TargetStatus,
    /// Why the asset is out of scope ("third-party", "decommissioned", ...).
    pub reason: String,
}

/// Narrow read-only view of an asset record.
///
/// The full asset (owned by the asset-management subsystem) is irrelevant
/// here beyond these fields. `metadata` supplies dialect-specific fallback
/// values (`ip`, `domain`, `provider`/`account_id`, `host`) when `name`
/// is not the natural matchable string for the asset's type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssetProjection {
    pub id: String,
    #[serde(rename = "type")]
    pub asset_type: String,
    pub name: String,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl AssetProjection {
    /// Look up a string-valued metadata field.
    #[must_use]
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(serde_json::Value::as_str)
    }
}

/// How a match was achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Pattern equals the candidate verbatim (after case folding).
    Exact,
    /// Pattern contained at least one `*` token.
    Wildcard,
    /// IPv4 CIDR range containment.
    Cidr,
    /// Reserved for a future dialect. No matcher currently produces it.
    Regex,
}

impl MatchType {
    /// Human-readable label, matching the wire form.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Wildcard => "wildcard",
            Self::Cidr => "cidr",
            Self::Regex => "regex",
        }
    }
}

/// One matched in-scope rule inside a [`ScopeMatchResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetMatch {
    pub target_id: String,
    pub pattern: String,
    pub match_type: MatchType,
}

/// One matched exclusion rule inside a [`ScopeMatchResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionMatch {
    pub exclusion_id: String,
    pub pattern: String,
    pub reason: String,
}

/// Full verdict for one asset against one rule set.
///
/// Computed fresh per call, never persisted. Invariant:
/// `in_scope == (!matched_targets.is_empty() && matched_exclusions.is_empty())`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeMatchResult {
    pub asset_id: String,
    pub asset_name: String,
    pub asset_type: String,
    pub matched_targets: Vec<TargetMatch>,
    pub matched_exclusions: Vec<ExclusionMatch>,
    pub in_scope: bool,
}

impl ScopeMatchResult {
    /// Returns true if the asset is inside the assessment boundary.
    #[inline]
    #[must_use]
    pub fn is_in_scope(&self) -> bool {
        self.in_scope
    }

    /// Returns true if an exclusion forced the asset out of scope.
    #[inline]
    #[must_use]
    pub fn is_excluded(&self) -> bool {
        !self.matched_exclusions.is_empty()
    }
}

/// Per-asset-type slice of a coverage report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TypeCoverage {
    pub total: usize,
    pub in_scope: usize,
    pub excluded: usize,
}

/// Aggregate coverage over an asset population.
///
/// Invariants: `in_scope_assets + excluded_assets + uncovered_assets ==
/// total_assets`, and `coverage_percent` is the rounded in-scope fraction
/// (0 for an empty population). Rebuilt wholesale, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScopeCoverage {
    pub total_assets: usize,
    pub in_scope_assets: usize,
    pub excluded_assets: usize,
    pub uncovered_assets: usize,
    pub coverage_percent: u32,
    /// Keyed by asset type string; `BTreeMap` keeps report output stable.
    pub by_type: BTreeMap<String, TypeCoverage>,
}
