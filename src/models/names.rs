use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::names::MatchTolerance;

/// Edit-distance overrides; anything left out falls back to the server
/// configuration.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct ToleranceParams {
    /// Maximum edit distance for given and middle names
    pub levenshtein: Option<usize>,
    /// Maximum edit distance for the family name (default: `levenshtein`)
    pub levenshtein_last: Option<usize>,
    /// Family names this long tolerate one extra edit
    pub large_last_name_threshold: Option<usize>,
}

impl ToleranceParams {
    pub fn resolve(&self, defaults: &MatchTolerance) -> MatchTolerance {
        // An explicit `levenshtein` also becomes the family-name limit
        // unless that one is given too.
        let last = match (self.levenshtein, self.levenshtein_last) {
            (_, Some(last)) => Some(last),
            (Some(_), None) => None,
            (None, None) => defaults.last_max_edit_distance,
        };
        MatchTolerance {
            non_last_max_edit_distance: self
                .levenshtein
                .unwrap_or(defaults.non_last_max_edit_distance),
            last_max_edit_distance: last,
            large_last_name_threshold: self
                .large_last_name_threshold
                .unwrap_or(defaults.large_last_name_threshold),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NormalizeRequest {
    pub name: Option<String>,
    /// Expand compressed initials such as "CG Von Wangenheim"
    #[serde(default)]
    pub super_compact: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NormalizeResponse {
    /// Tokens joined by single spaces; null for a null name
    pub normalized: Option<String>,
    pub tokens: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CanonicalizeRequest {
    /// Preferred spelling when both names have as many tokens
    pub a: Option<String>,
    pub b: Option<String>,
    #[serde(flatten)]
    pub tolerance: ToleranceParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CanonicalizeResponse {
    pub canonical: Option<String>,
    pub same: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct IsInRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(flatten)]
    pub tolerance: ToleranceParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MatchResponse {
    pub matched: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let defaults = MatchTolerance::levenshtein(1).with_last(2);
        assert_eq!(ToleranceParams::default().resolve(&defaults), defaults);
    }

    #[test]
    fn test_levenshtein_overrides_last_too() {
        let defaults = MatchTolerance::levenshtein(1).with_last(2);
        let params = ToleranceParams {
            levenshtein: Some(0),
            ..Default::default()
        };
        assert_eq!(params.resolve(&defaults).last_edit_distance(), 0);

        let params = ToleranceParams {
            levenshtein: Some(0),
            levenshtein_last: Some(3),
            large_last_name_threshold: Some(10),
        };
        let resolved = params.resolve(&defaults);
        assert_eq!(resolved.last_edit_distance(), 3);
        assert_eq!(resolved.large_last_name_threshold, 10);
    }
}
