use ppgcc_metrics::names::{canonicalize, normalize, same_name, MatchTolerance};
use proptest::prelude::*;

/// Name-like strings: letters (some accented or special), dots and irregular spacing.
fn raw_name() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-ZáéíóúãõçÁÉÍÓÚÃÕÇøØæÆǢǣǼǽǾǿŉłßœ.]{1,10}", 1..5)
        .prop_map(|words| format!(" {} ", words.join("  ")))
}

/// Names that carry at least one letter.
fn non_empty_name() -> impl Strategy<Value = String> {
    raw_name().prop_filter("needs a letter", |s| !normalize(s).is_blank())
}

proptest! {
    #[test]
    fn normalize_is_idempotent(raw in raw_name()) {
        let once = normalize(&raw);
        prop_assert_eq!(normalize(&once.to_string()), once);
    }

    #[test]
    fn empty_side_never_matches(x in raw_name(), lev in 0usize..3) {
        let tolerance = MatchTolerance::levenshtein(lev);
        prop_assert_eq!(canonicalize(&x, "", &tolerance), None);
        prop_assert_eq!(canonicalize("  ", &x, &tolerance), None);
    }

    #[test]
    fn same_name_is_reflexive(x in non_empty_name()) {
        prop_assert!(same_name(&x, &x, &MatchTolerance::default()));
    }

    #[test]
    fn looser_tolerance_keeps_matches(a in non_empty_name(), b in non_empty_name(), k in 0usize..3) {
        if same_name(&a, &b, &MatchTolerance::levenshtein(k)) {
            prop_assert!(same_name(&a, &b, &MatchTolerance::levenshtein(k + 1)));
        }
    }

    #[test]
    fn canonical_name_is_never_empty(a in non_empty_name(), b in non_empty_name()) {
        let tolerance = MatchTolerance::levenshtein(1);
        if let Some(canonical) = canonicalize(&a, &b, &tolerance) {
            prop_assert!(!canonical.is_empty());
        }
    }
}
