//! Citation author lists: `"SILVA, Fulano; COSTA, Siclano B."` and friends.

use std::fmt;
use std::str::FromStr;

use super::error::NameError;
use super::matcher::{canonicalize_normalized, MatchTolerance};
use super::normalize::{normalize, normalize_with, NormalizedName};

/// How each entry of an author list lays out a person's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameOrder {
    /// `"Last, First Middle"`
    #[default]
    LastCommaFirst,
    /// `"Last First Middle"`
    LastFirst,
    /// `"First Middle Last"`
    FirstFirst,
}

impl NameOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            NameOrder::LastCommaFirst => ",",
            NameOrder::LastFirst => "LAST_FIRST",
            NameOrder::FirstFirst => "FIRST_FIRST",
        }
    }
}

impl fmt::Display for NameOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NameOrder {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "," => Ok(NameOrder::LastCommaFirst),
            "LAST_FIRST" => Ok(NameOrder::LastFirst),
            "FIRST_FIRST" => Ok(NameOrder::FirstFirst),
            _ => Err(NameError::UnknownOrder(s.to_string())),
        }
    }
}

/// Which entry of an author list to test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorPosition {
    #[default]
    Any,
    Index(usize),
}

impl AuthorPosition {
    pub const FIRST: AuthorPosition = AuthorPosition::Index(0);
}

impl FromStr for AuthorPosition {
    type Err = NameError;

    /// Accepts `"FIRST"` or a non-negative index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("FIRST") {
            return Ok(AuthorPosition::FIRST);
        }
        s.parse::<usize>()
            .map(AuthorPosition::Index)
            .map_err(|_| NameError::InvalidPosition(s.to_string()))
    }
}

/// Layout of a delimited author-list string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorListFormat {
    pub separator: String,
    pub order: NameOrder,
    /// `same_authors` accepts lists of different lengths.
    pub allow_extras: bool,
    /// Expand compressed initials (`"CG Von Wangenheim"`) in every entry.
    pub super_compact: bool,
}

impl Default for AuthorListFormat {
    fn default() -> Self {
        Self {
            separator: ";".to_string(),
            order: NameOrder::default(),
            allow_extras: false,
            super_compact: false,
        }
    }
}

impl AuthorListFormat {
    pub fn validate(&self) -> Result<(), NameError> {
        if self.separator.is_empty() {
            return Err(NameError::EmptySeparator);
        }
        if self.separator == self.order.as_str() {
            return Err(NameError::SeparatorConflictsWithOrder {
                separator: self.separator.clone(),
                order: self.order.to_string(),
            });
        }
        Ok(())
    }
}

/// One name parsed out of an author list, already in "First Last" order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorEntry {
    pub position: usize,
    pub name: String,
}

/// Split an author list into entries. Blank entries (a trailing separator,
/// say) are dropped before positions are assigned.
pub fn parse_author_list(list: &str, format: &AuthorListFormat) -> Result<Vec<AuthorEntry>, NameError> {
    format.validate()?;
    Ok(list
        .split(format.separator.as_str())
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .enumerate()
        .map(|(position, entry)| AuthorEntry {
            position,
            name: first_last(entry, format),
        })
        .collect())
}

fn first_last(entry: &str, format: &AuthorListFormat) -> String {
    let name = match format.order {
        NameOrder::LastCommaFirst => match entry.split_once(',') {
            Some((last, rest)) => format!("{} {}", rest.trim(), last.trim()),
            None => entry.to_string(),
        },
        NameOrder::LastFirst => match entry.split_once(char::is_whitespace) {
            Some((last, rest)) => format!("{} {}", rest.trim(), last),
            None => entry.to_string(),
        },
        NameOrder::FirstFirst => entry.to_string(),
    };
    if format.super_compact {
        normalize_with(&name, true).to_string()
    } else {
        name
    }
}

/// True if `name` matches an entry of `list` (or the entry at `position`).
/// An out-of-range position is simply not a match.
pub fn is_author(
    name: &str,
    list: &str,
    format: &AuthorListFormat,
    position: AuthorPosition,
    tolerance: &MatchTolerance,
) -> Result<bool, NameError> {
    let entries = parse_author_list(list, format)?;
    let name = normalize(name);
    let matches = |entry: &AuthorEntry| {
        canonicalize_normalized(&name, &normalize(&entry.name), tolerance).is_some()
    };

    Ok(match position {
        AuthorPosition::Any => entries.iter().any(matches),
        AuthorPosition::Index(i) => entries.get(i).is_some_and(matches),
    })
}

/// True if both lists name the same authors in the same order.
///
/// With `format.allow_extras`, the shorter list only has to match an
/// ordered subsequence of the longer one. Two missing lists are equal.
pub fn same_authors(
    a: Option<&str>,
    b: Option<&str>,
    format: &AuthorListFormat,
    tolerance: &MatchTolerance,
) -> Result<bool, NameError> {
    format.validate()?;
    let (a, b) = match (a, b) {
        (None, None) => return Ok(true),
        (Some(a), Some(b)) => (a, b),
        _ => return Ok(false),
    };

    let a = normalized_entries(a, format)?;
    let b = normalized_entries(b, format)?;
    if !format.allow_extras && a.len() != b.len() {
        return Ok(false);
    }
    let (short, long) = if b.len() < a.len() { (&b, &a) } else { (&a, &b) };

    let mut rest = long.as_slice();
    for wanted in short {
        match rest
            .iter()
            .position(|candidate| canonicalize_normalized(wanted, candidate, tolerance).is_some())
        {
            Some(i) => rest = &rest[i + 1..],
            None => return Ok(false),
        }
    }
    Ok(true)
}

fn normalized_entries(list: &str, format: &AuthorListFormat) -> Result<Vec<NormalizedName>, NameError> {
    Ok(parse_author_list(list, format)?
        .iter()
        .map(|entry| normalize(&entry.name))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST: &str = "SILVA, Fulano; COSTA, Siclano B.";

    fn fmt() -> AuthorListFormat {
        AuthorListFormat::default()
    }

    fn tol() -> MatchTolerance {
        MatchTolerance::default()
    }

    #[test]
    fn test_is_author_any_position() {
        assert!(is_author("Siclano Costa", LIST, &fmt(), AuthorPosition::Any, &tol()).unwrap());
        assert!(is_author("Fulano Silva", LIST, &fmt(), AuthorPosition::Any, &tol()).unwrap());
        assert!(!is_author("Beltrano Costa", LIST, &fmt(), AuthorPosition::Any, &tol()).unwrap());
    }

    #[test]
    fn test_is_author_at_position() {
        assert!(is_author("Siclano Costa", LIST, &fmt(), AuthorPosition::Index(1), &tol()).unwrap());
        assert!(!is_author("Siclano Costa", LIST, &fmt(), AuthorPosition::Index(0), &tol()).unwrap());
        assert!(is_author("Fulano Silva", LIST, &fmt(), AuthorPosition::FIRST, &tol()).unwrap());
        assert!(!is_author("Fulano Silva", LIST, &fmt(), AuthorPosition::Index(7), &tol()).unwrap());
    }

    #[test]
    fn test_position_parsing() {
        assert_eq!("FIRST".parse::<AuthorPosition>(), Ok(AuthorPosition::Index(0)));
        assert_eq!("3".parse::<AuthorPosition>(), Ok(AuthorPosition::Index(3)));
        assert_eq!(
            "LAST".parse::<AuthorPosition>(),
            Err(NameError::InvalidPosition("LAST".to_string()))
        );
        assert!("-1".parse::<AuthorPosition>().is_err());
    }

    #[test]
    fn test_order_parsing() {
        assert_eq!(",".parse::<NameOrder>(), Ok(NameOrder::LastCommaFirst));
        assert_eq!("LAST_FIRST".parse::<NameOrder>(), Ok(NameOrder::LastFirst));
        assert_eq!("first_first".parse::<NameOrder>(), Ok(NameOrder::FirstFirst));
        assert!(matches!("FIRST".parse::<NameOrder>(), Err(NameError::UnknownOrder(_))));
    }

    #[test]
    fn test_separator_must_differ_from_order() {
        let format = AuthorListFormat {
            separator: ",".to_string(),
            ..fmt()
        };
        let err = is_author("Fulano Silva", LIST, &format, AuthorPosition::Any, &tol()).unwrap_err();
        assert!(matches!(err, NameError::SeparatorConflictsWithOrder { .. }));

        let empty = AuthorListFormat {
            separator: String::new(),
            ..fmt()
        };
        assert_eq!(empty.validate(), Err(NameError::EmptySeparator));
    }

    #[test]
    fn test_parse_orders() {
        let parsed = parse_author_list("SILVA, Fulano;COSTA, Siclano B.;", &fmt()).unwrap();
        assert_eq!(
            parsed,
            vec![
                AuthorEntry { position: 0, name: "Fulano SILVA".to_string() },
                AuthorEntry { position: 1, name: "Siclano B. COSTA".to_string() },
            ]
        );

        let last_first = AuthorListFormat {
            separator: ",".to_string(),
            order: NameOrder::LastFirst,
            ..fmt()
        };
        let parsed = parse_author_list("Silva Fulano, Costa Siclano B.", &last_first).unwrap();
        assert_eq!(parsed[0].name, "Fulano Silva");
        assert_eq!(parsed[1].name, "Siclano B. Costa");

        let first_first = AuthorListFormat {
            separator: " and ".to_string(),
            order: NameOrder::FirstFirst,
            ..fmt()
        };
        let parsed = parse_author_list("Fulano Silva and Siclano Costa", &first_first).unwrap();
        assert_eq!(parsed[1].name, "Siclano Costa");
    }

    #[test]
    fn test_entry_splits_on_first_comma() {
        let parsed = parse_author_list("SILVA, Fulano, Jr.", &fmt()).unwrap();
        assert_eq!(parsed[0].name, "Fulano, Jr. SILVA");

        let list = "COSTA, Siclano, B.";
        let lev1 = MatchTolerance::levenshtein(1);
        assert!(is_author("Siclano Costa", list, &fmt(), AuthorPosition::Any, &lev1).unwrap());
    }

    #[test]
    fn test_super_compact_bylines() {
        let format = AuthorListFormat {
            separator: ",".to_string(),
            order: NameOrder::FirstFirst,
            super_compact: true,
            ..fmt()
        };
        let list = "CG Von Wangenheim, RS Mello";
        assert!(is_author(
            "Christiane Gresse von Wangenheim",
            list,
            &format,
            AuthorPosition::FIRST,
            &tol()
        )
        .unwrap());
    }

    #[test]
    fn test_same_authors() {
        let a = "SILVA, F.; COSTA, Siclano B.";
        let b = "SILVA, Fulano; COSTA, Siclano";
        assert!(same_authors(Some(a), Some(b), &fmt(), &tol()).unwrap());
        assert!(!same_authors(Some("COSTA, Siclano; SILVA, Fulano"), Some(b), &fmt(), &tol()).unwrap());
    }

    #[test]
    fn test_same_authors_extras() {
        let long = "SILVA, Fulano; SOUZA, Maria; COSTA, Siclano";
        let short = "SILVA, Fulano; COSTA, Siclano";
        assert!(!same_authors(Some(long), Some(short), &fmt(), &tol()).unwrap());

        let extras = AuthorListFormat {
            allow_extras: true,
            ..fmt()
        };
        assert!(same_authors(Some(long), Some(short), &extras, &tol()).unwrap());
        assert!(same_authors(Some(short), Some(long), &extras, &tol()).unwrap());
        assert!(!same_authors(Some("COSTA, Siclano; SILVA, Fulano"), Some(long), &extras, &tol()).unwrap());
    }

    #[test]
    fn test_same_authors_missing_lists() {
        assert!(same_authors(None, None, &fmt(), &tol()).unwrap());
        assert!(!same_authors(Some(LIST), None, &fmt(), &tol()).unwrap());
        assert!(!same_authors(None, Some(LIST), &fmt(), &tol()).unwrap());
    }
}
