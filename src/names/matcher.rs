//! Pairwise person-name matching.
//!
//! Two names match when their family names and given names are within the
//! configured edit distance and the middle names of the shorter one can be
//! aligned, in order, against the middle names of the longer one. Middle
//! names may be dropped or abbreviated but never reordered.

use super::normalize::{bare, normalize, NormalizedName};

/// Edit-distance limits used when deciding whether two names match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchTolerance {
    /// Limit for given and middle names.
    pub non_last_max_edit_distance: usize,
    /// Limit for the family name; `None` means "same as the others".
    pub last_max_edit_distance: Option<usize>,
    /// Family names at least this long tolerate one extra edit.
    pub large_last_name_threshold: usize,
}

pub const DEFAULT_LARGE_LAST_NAME_THRESHOLD: usize = 7;

impl Default for MatchTolerance {
    fn default() -> Self {
        Self {
            non_last_max_edit_distance: 0,
            last_max_edit_distance: None,
            large_last_name_threshold: DEFAULT_LARGE_LAST_NAME_THRESHOLD,
        }
    }
}

impl MatchTolerance {
    pub fn levenshtein(distance: usize) -> Self {
        Self {
            non_last_max_edit_distance: distance,
            ..Self::default()
        }
    }

    pub fn with_last(mut self, distance: usize) -> Self {
        self.last_max_edit_distance = Some(distance);
        self
    }

    pub fn last_edit_distance(&self) -> usize {
        self.last_max_edit_distance
            .unwrap_or(self.non_last_max_edit_distance)
    }
}

/// Edit distance between two bare tokens, guarded against strings too short
/// for edit distance to mean anything.
///
/// A lone initial is compatible with any word longer than three letters
/// that starts with it (`"C"` vs `"CARLOS"`), but two different lone
/// letters are always a mismatch.
pub fn safe_distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let (la, lb) = (char_len(a), char_len(b));
    let mismatch = la.max(lb) + 1;
    if la == 0 || lb == 0 {
        return mismatch;
    }
    let same_initial = a.chars().next() == b.chars().next();
    if same_initial && ((la == 1 && lb > 3) || (lb == 1 && la > 3)) {
        return 0;
    }
    if la < 3 || lb < 3 {
        return mismatch;
    }
    strsim::levenshtein(a, b)
}

/// Canonical spelling for `x` and `y` if they denote the same person.
///
/// When both names have the same number of tokens, the spelling of `x`
/// wins, so pass the more authoritative source first.
///
/// ```
/// use ppgcc_metrics::names::{canonicalize, MatchTolerance};
///
/// let tol = MatchTolerance::default();
/// assert_eq!(canonicalize("joão silva", "João Silva", &tol).as_deref(), Some("JOAO SILVA"));
/// assert_eq!(canonicalize("joão silva", "João Silvo", &tol), None);
/// ```
pub fn canonicalize(x: &str, y: &str, tolerance: &MatchTolerance) -> Option<String> {
    canonicalize_normalized(&normalize(x), &normalize(y), tolerance)
}

pub fn same_name(x: &str, y: &str, tolerance: &MatchTolerance) -> bool {
    canonicalize(x, y, tolerance).is_some()
}

/// True if `name` is the same person as any of `names`.
pub fn is_in<'a, I>(name: &str, names: I, tolerance: &MatchTolerance) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let name = normalize(name);
    names
        .into_iter()
        .any(|other| canonicalize_normalized(&name, &normalize(other), tolerance).is_some())
}

/// [`canonicalize`] over names that were already normalized.
pub fn canonicalize_normalized(
    x: &NormalizedName,
    y: &NormalizedName,
    tolerance: &MatchTolerance,
) -> Option<String> {
    if x.is_blank() || y.is_blank() {
        return None;
    }

    let (last_x, last_y) = (bare(x.family()), bare(y.family()));
    let mut last_tolerance = tolerance.last_edit_distance();
    if char_len(last_x).max(char_len(last_y)) >= tolerance.large_last_name_threshold {
        last_tolerance = last_tolerance.saturating_add(1);
    }
    if safe_distance(last_x, last_y) > last_tolerance {
        return None;
    }

    let max = tolerance.non_last_max_edit_distance;
    if safe_distance(bare(x.given()), bare(y.given())) > max {
        return None;
    }

    let mut x = x.tokens().to_vec();
    let y = y.tokens().to_vec();
    if char_len(bare(&x[0])) == 1 && char_len(bare(&y[0])) > 1 {
        x[0] = y[0].clone();
    }

    let (mut primary, secondary) = if y.len() > x.len() { (y, x) } else { (x, y) };
    if primary.len() <= 2 {
        return Some(primary.join(" "));
    }

    if !aligns(middle(&secondary), middle(&primary), max) {
        return None;
    }
    expand_abbreviations(&mut primary, middle(&secondary), max);

    Some(primary.join(" "))
}

/// Middle names: everything between the given and the family name.
fn middle(tokens: &[String]) -> &[String] {
    if tokens.len() > 2 {
        &tokens[1..tokens.len() - 1]
    } else {
        &[]
    }
}

/// Every needle matches a haystack token, in order, skipping extras.
fn aligns(needles: &[String], haystack: &[String], max: usize) -> bool {
    let mut rest = haystack;
    for needle in needles {
        match rest
            .iter()
            .position(|t| safe_distance(bare(t), bare(needle)) <= max)
        {
            Some(i) => rest = &rest[i + 1..],
            None => return false,
        }
    }
    true
}

/// Replace middle initials of `primary` with the full middle names they
/// align with in `secondary`.
fn expand_abbreviations(primary: &mut [String], secondary: &[String], max: usize) {
    let end = primary.len() - 1;
    let mut cursor = 0;
    for token in &mut primary[1..end] {
        let found = secondary[cursor..]
            .iter()
            .position(|s| safe_distance(bare(token.as_str()), bare(s)) <= max);
        if let Some(offset) = found {
            let full = &secondary[cursor + offset];
            if char_len(bare(token.as_str())) == 1 && char_len(bare(full)) > 1 {
                *token = full.clone();
            }
            cursor += offset + 1;
        }
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
