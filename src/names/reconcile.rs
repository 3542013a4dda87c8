//! Cross-source name reconciliation.
//!
//! Given one collection of names per data source, work out which names in
//! different sources denote the same person and which spelling should be
//! used for them. Earlier collections are treated as more authoritative:
//! on ties their spelling wins.

use std::collections::{BTreeMap, BTreeSet};

use super::error::NameError;
use super::matcher::{canonicalize_normalized, MatchTolerance, DEFAULT_LARGE_LAST_NAME_THRESHOLD};
use super::normalize::{bare, normalize, NormalizedName};

/// Upper bound accepted by [`ReconcileOptions::validate`]. Every round is
/// quadratic in the collection sizes and there is one round per pair of
/// tolerances.
pub const MAX_RECONCILE_EDIT_DISTANCE: usize = 10;

/// Normalized name → canonical replacement, for one collection.
pub type CanonMap = BTreeMap<String, String>;

/// A tabular record: column name → value.
pub type Record = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Map names with several candidates instead of leaving them alone.
    pub allow_ambiguous: bool,
    pub max_edit_distance: usize,
    /// `None` means "same as `max_edit_distance`".
    pub max_last_edit_distance: Option<usize>,
    pub large_last_name_threshold: usize,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            allow_ambiguous: false,
            max_edit_distance: 1,
            max_last_edit_distance: None,
            large_last_name_threshold: DEFAULT_LARGE_LAST_NAME_THRESHOLD,
        }
    }
}

impl ReconcileOptions {
    pub fn validate(&self) -> Result<(), NameError> {
        let limits = [
            ("max_edit_distance", Some(self.max_edit_distance)),
            ("max_last_edit_distance", self.max_last_edit_distance),
        ];
        for (field, value) in limits {
            if let Some(value) = value.filter(|v| *v > MAX_RECONCILE_EDIT_DISTANCE) {
                return Err(NameError::EditDistanceTooLarge {
                    field,
                    value,
                    max: MAX_RECONCILE_EDIT_DISTANCE,
                });
            }
        }
        Ok(())
    }

    /// Tolerances to try, strictest first. Distances never exceed the
    /// longest token plus one, so tolerances past `cap` repeat the last round.
    fn rounds(&self, cap: usize) -> impl Iterator<Item = MatchTolerance> + '_ {
        let max_lev = self.max_edit_distance.min(cap);
        let max_last = self
            .max_last_edit_distance
            .unwrap_or(self.max_edit_distance)
            .min(cap);
        (0..=max_lev).flat_map(move |lev| {
            (0..=max_last).map(move |lev_last| MatchTolerance {
                non_last_max_edit_distance: lev,
                last_max_edit_distance: Some(lev_last),
                large_last_name_threshold: self.large_last_name_threshold,
            })
        })
    }
}

/// One canonical map per input collection, in input order.
///
/// Keys are normalized names as they appear in that collection; names that
/// need no correction are absent. A name that matches several names of
/// another collection is ambiguous and never mapped, unless
/// `allow_ambiguous` is set.
///
/// ```
/// use ppgcc_metrics::names::{canon_maps, ReconcileOptions};
///
/// let maps = canon_maps(
///     [vec!["John Doe", "João Silva"], vec!["Joao Gomes Silva"]],
///     &ReconcileOptions::default(),
/// );
/// assert_eq!(maps[0]["JOAO SILVA"], "JOAO GOMES SILVA");
/// assert!(maps[1].is_empty());
/// ```
pub fn canon_maps<I, C, S>(collections: I, options: &ReconcileOptions) -> Vec<CanonMap>
where
    I: IntoIterator<Item = C>,
    C: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let sets: Vec<Vec<(String, NormalizedName)>> = collections
        .into_iter()
        .map(|collection| {
            collection
                .into_iter()
                .map(|name| normalize(name.as_ref()).to_string())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(|name| {
                    let normalized = normalize(&name);
                    (name, normalized)
                })
                .collect()
        })
        .collect();

    let longest_token = sets
        .iter()
        .flatten()
        .flat_map(|(_, normalized)| normalized.tokens())
        .map(|token| bare(token).chars().count())
        .max()
        .unwrap_or(0);

    let mut tentative = Tentative::new(sets.len());
    for tolerance in options.rounds(longest_token + 1) {
        let before = tentative.corrections();
        for i in 0..sets.len() {
            for (name, normalized) in &sets[i] {
                for j in i + 1..sets.len() {
                    let candidates: Vec<(&str, String)> = sets[j]
                        .iter()
                        .filter_map(|(other, other_normalized)| {
                            canonicalize_normalized(normalized, other_normalized, &tolerance)
                                .map(|canonical| (other.as_str(), canonical))
                        })
                        .collect();

                    if candidates.len() > 1 && !options.allow_ambiguous {
                        tentative.mark_ambiguous(name, &candidates);
                        continue;
                    }
                    for (candidate, canonical) in candidates {
                        if candidate == name.as_str() {
                            continue;
                        }
                        if canonical != *name {
                            tentative.correct(i, name, &canonical);
                        }
                        if canonical != candidate {
                            tentative.correct(j, candidate, &canonical);
                        }
                    }
                }
            }
        }
        tracing::debug!(
            levenshtein = tolerance.non_last_max_edit_distance,
            levenshtein_last = tolerance.last_edit_distance(),
            new_corrections = tentative.corrections() - before,
            ambiguous = tentative.ambiguous.len(),
            "reconciliation round done"
        );
    }

    tentative.finish()
}

/// Corrections and ambiguous names gathered across all rounds, before
/// ambiguous names are filtered out.
struct Tentative {
    maps: Vec<CanonMap>,
    ambiguous: BTreeSet<String>,
}

impl Tentative {
    fn new(collections: usize) -> Self {
        Self {
            maps: vec![CanonMap::new(); collections],
            ambiguous: BTreeSet::new(),
        }
    }

    fn corrections(&self) -> usize {
        self.maps.iter().map(BTreeMap::len).sum()
    }

    /// Record `name → canonical` unless a longer spelling is already there.
    fn correct(&mut self, collection: usize, name: &str, canonical: &str) {
        let map = &mut self.maps[collection];
        match map.get(name) {
            Some(existing) if existing.len() >= canonical.len() => {}
            _ => {
                map.insert(name.to_string(), canonical.to_string());
            }
        }
    }

    /// The shortest of `name` and its candidates is the one that can't be
    /// told apart. Equal lengths go to the alphabetically first.
    fn mark_ambiguous(&mut self, name: &str, candidates: &[(&str, String)]) {
        let shortest = std::iter::once(name)
            .chain(candidates.iter().map(|(candidate, _)| *candidate))
            .min_by_key(|s| (s.len(), *s))
            .unwrap_or(name);
        if self.ambiguous.insert(shortest.to_string()) {
            tracing::trace!(name = shortest, "ambiguous name");
        }
    }

    fn finish(self) -> Vec<CanonMap> {
        let ambiguous = self.ambiguous;
        self.maps
            .into_iter()
            .map(|map| {
                map.into_iter()
                    .filter(|(name, _)| !ambiguous.contains(name))
                    .collect()
            })
            .collect()
    }
}

/// Replacement for a raw value, if its normalized form was corrected.
pub fn canonical_for<'a>(value: &str, map: &'a CanonMap) -> Option<&'a str> {
    map.get(&normalize(value).to_string()).map(String::as_str)
}

/// Rewrite the name columns `fields` of every record through `map`.
/// Values without a correction, and columns not listed, are kept as is.
pub fn apply_canon_map<S: AsRef<str>>(records: &[Record], fields: &[S], map: &CanonMap) -> Vec<Record> {
    records
        .iter()
        .map(|record| {
            let mut fixed = record.clone();
            for field in fields {
                let Some(value) = record.get(field.as_ref()) else {
                    continue;
                };
                if let Some(canonical) = canonical_for(value, map) {
                    fixed.insert(field.as_ref().to_string(), canonical.to_string());
                }
            }
            fixed
        })
        .collect()
}
