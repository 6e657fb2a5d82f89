//! One-line summaries of scope verdicts for list views.

use crate::types::ScopeMatchResult;

/// Render a match result as the dashboard's one-line summary.
///
/// Exclusions take precedence in the rendering, like everywhere else:
/// an excluded asset reports the first exclusion's reason even when
/// targets also matched.
#[must_use]
pub fn format_scope_match(result: &ScopeMatchResult) -> String {
    if let Some(exclusion) = result.matched_exclusions.first() {
        return format!("Excluded: {}", exclusion.reason);
    }

    if result.in_scope {
        let patterns: Vec<&str> = result
            .matched_targets
            .iter()
            .map(|m| m.pattern.as_str())
            .collect();
        return format!("In scope: {}", patterns.join(", "));
    }

    "Not in scope".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExclusionMatch, MatchType, TargetMatch};

    fn result() -> ScopeMatchResult {
        ScopeMatchResult {
            asset_id: "a1".to_string(),
            asset_name: "api.acme.com".to_string(),
            asset_type: "website".to_string(),
            matched_targets: Vec::new(),
            matched_exclusions: Vec::new(),
            in_scope: false,
        }
    }

    #[test]
    fn excluded_renders_the_reason() {
        let mut r = result();
        r.matched_targets.push(TargetMatch {
            target_id: "t1".to_string(),
            pattern: "*.acme.com".to_string(),
            match_type: MatchType::Wildcard,
        });
        r.matched_exclusions.push(ExclusionMatch {
            exclusion_id: "e1".to_string(),
            pattern: "status.acme.com".to_string(),
            reason: "third-party".to_string(),
        });
        assert_eq!(format_scope_match(&r), "Excluded: third-party");
    }

    #[test]
    fn in_scope_lists_matched_patterns() {
        let mut r = result();
        r.in_scope = true;
        r.matched_targets.push(TargetMatch {
            target_id: "t1".to_string(),
            pattern: "*.acme.com".to_string(),
            match_type: MatchType::Wildcard,
        });
        r.matched_targets.push(TargetMatch {
            target_id: "t2".to_string(),
            pattern: "api.acme.com".to_string(),
            match_type: MatchType::Exact,
        });
        assert_eq!(format_scope_match(&r), "In scope: *.acme.com, api.acme.com");
    }

    #[test]
    fn unmatched_is_not_in_scope() {
        assert_eq!(format_scope_match(&result()), "Not in scope");
    }
}
