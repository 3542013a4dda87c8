//! Personal-name normalization.
//!
//! A raw name such as `" joão  C.Silva "` becomes the token sequence
//! `["JOAO", "C.", "SILVA"]`:
//! - Transliterate to ASCII (diacritics removed, ł → L, ß → SS, ...)
//! - Trim and upper-case
//! - Collapse whitespace runs
//! - Split tokens on internal dots, keeping a trailing dot on the
//!   abbreviated token itself
//!
//! Two raw names that normalize to the same tokens are the same person.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// One name token: a run of non-dot characters plus an optional trailing dot.
static TOKEN_RX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^.\s]+\.?").expect("valid token regex"));

/// A name reduced to comparable, upper-case ASCII tokens.
///
/// The first token is the given name and the last one the family name.
/// There is always at least one token, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedName {
    tokens: Vec<String>,
}

impl NormalizedName {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when no token carries a single letter, e.g. for `""` or `" . "`.
    pub fn is_blank(&self) -> bool {
        self.tokens.iter().all(|t| bare(t).is_empty())
    }

    pub fn given(&self) -> &str {
        &self.tokens[0]
    }

    pub fn family(&self) -> &str {
        &self.tokens[self.tokens.len() - 1]
    }

    pub(crate) fn into_tokens(self) -> Vec<String> {
        self.tokens
    }
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

/// Normalize a name for matching.
///
/// # Examples
///
/// ```
/// use ppgcc_metrics::names::normalize;
///
/// assert_eq!(normalize("João  Silva e  Costa").to_string(), "JOAO SILVA E COSTA");
/// assert_eq!(normalize("J.Doe").tokens(), ["J.", "DOE"]);
/// ```
pub fn normalize(raw: &str) -> NormalizedName {
    normalize_with(raw, false)
}

/// Like [`normalize`], but first expands compressed initials runs found in
/// scraped citation bylines: `"CG Von Wangenheim"` → `"C. G. VON WANGENHEIM"`.
pub fn normalize_compact(raw: &str) -> NormalizedName {
    normalize_with(raw, true)
}

pub(crate) fn normalize_with(raw: &str, super_compact: bool) -> NormalizedName {
    let folded = fold_to_ascii(raw.trim());
    let expanded = if super_compact {
        expand_initials_runs(&folded)
    } else {
        folded
    };
    let upper = expanded.to_uppercase();

    let mut tokens: Vec<String> = upper
        .split_whitespace()
        .flat_map(|word| TOKEN_RX.find_iter(word))
        .map(|m| m.as_str().to_string())
        .collect();
    if tokens.is_empty() {
        tokens.push(String::new());
    }
    NormalizedName { tokens }
}

/// Token with its abbreviation dot stripped.
pub fn bare(token: &str) -> &str {
    token.strip_suffix('.').unwrap_or(token)
}

/// Expand `"CG"` into `"C. G."` when it is immediately followed by a word
/// containing lower-case letters (so it can't be an all-caps surname).
fn expand_initials_runs(s: &str) -> String {
    let words: Vec<&str> = s.split_whitespace().collect();
    let mut out: Vec<String> = Vec::with_capacity(words.len());

    for (i, word) in words.iter().enumerate() {
        let is_run = word.chars().count() >= 2 && word.chars().all(|c| c.is_ascii_uppercase());
        let next_has_lower = words
            .get(i + 1)
            .is_some_and(|next| next.chars().any(|c| c.is_lowercase()));

        if is_run && next_has_lower {
            out.extend(word.chars().map(|c| format!("{c}.")));
        } else {
            out.push((*word).to_string());
        }
    }
    out.join(" ")
}

/// Transliterate to ASCII: NFD with combining marks dropped, then the
/// special letters. Some precomposed letters only reveal a special letter
/// once decomposed (Ǣ is Æ plus a macron).
fn fold_to_ascii(s: &str) -> String {
    let stripped: String = s.nfd().filter(|c| !is_combining_mark(*c)).collect();
    replace_special_chars(&stripped)
}

/// Letters that are distinct letters rather than accented versions and so
/// don't decompose under NFD.
fn replace_special_chars(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            'Ł' => out.push('L'),
            'ł' => out.push('l'),
            'Ø' => out.push('O'),
            'ø' => out.push('o'),
            'Æ' => out.push_str("AE"),
            'æ' => out.push_str("ae"),
            'Œ' => out.push_str("OE"),
            'œ' => out.push_str("oe"),
            'ß' => out.push_str("ss"),
            'Ð' | 'Đ' => out.push('D'),
            'ð' | 'đ' => out.push('d'),
            'Þ' => out.push_str("TH"),
            'þ' => out.push_str("th"),
            'ı' => out.push('i'),
            'ŉ' => out.push_str("'n"),
            // Typographic apostrophes collapse onto the ASCII one (O’Brien)
            '\u{2018}' | '\u{2019}' | '\u{02BC}' => out.push('\''),
            _ => out.push(c),
        }
    }
    out
}

fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |
        '\u{1AB0}'..='\u{1AFF}' |
        '\u{1DC0}'..='\u{1DFF}' |
        '\u{20D0}'..='\u{20FF}' |
        '\u{FE20}'..='\u{FE2F}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(s: &str) -> String {
        normalize(s).to_string()
    }

    #[test]
    fn test_uppercase() {
        assert_eq!(norm("John Doe"), "JOHN DOE");
    }

    #[test]
    fn test_remove_spaces() {
        assert_eq!(norm(" John  Doe "), "JOHN DOE");
        assert_eq!(norm(" John Freddy  Doe "), "JOHN FREDDY DOE");
        assert_eq!(norm("John\t\nDoe"), "JOHN DOE");
    }

    #[test]
    fn test_remove_accents() {
        assert_eq!(norm("João Silva"), "JOAO SILVA");
        assert_eq!(norm("João  Silva e  Costa"), "JOAO SILVA E COSTA");
        assert_eq!(norm("Łukasz Wróbel"), "LUKASZ WROBEL");
        assert_eq!(norm("Jörg Weiß"), "JORG WEISS");
        assert_eq!(norm("Nguyễn Văn"), "NGUYEN VAN");
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(normalize("").tokens(), [""]);
        assert_eq!(normalize("   ").tokens(), [""]);
        assert!(normalize("  ").is_blank());
        assert!(normalize(" . ").is_blank());
        assert!(!normalize("x").is_blank());
    }

    #[test]
    fn test_dots_split_tokens() {
        assert_eq!(normalize("J.Doe").tokens(), ["J.", "DOE"]);
        assert_eq!(normalize("A.B. Smith").tokens(), ["A.", "B.", "SMITH"]);
        assert_eq!(normalize("C. Leite").tokens(), ["C.", "LEITE"]);
        assert_eq!(bare("C."), "C");
        assert_eq!(bare("LEITE"), "LEITE");
    }

    #[test]
    fn test_given_and_family() {
        let n = normalize("Maria  da Graça Souza");
        assert_eq!(n.given(), "MARIA");
        assert_eq!(n.family(), "SOUZA");
        assert_eq!(n.len(), 4);
    }

    #[test]
    fn test_super_compact_expands_initials() {
        assert_eq!(normalize_compact("CG Von Wangenheim").to_string(), "C. G. VON WANGENHEIM");
        assert_eq!(normalize_compact("RS Mello").to_string(), "R. S. MELLO");
        // all-caps bylines carry no case signal
        assert_eq!(normalize_compact("CG VON WANGENHEIM").to_string(), "CG VON WANGENHEIM");
        // off by default
        assert_eq!(norm("CG Von Wangenheim"), "CG VON WANGENHEIM");
    }

    #[test]
    fn test_decomposed_special_letters() {
        assert_eq!(norm("Sǿren Ǣrnes"), "SOREN AERNES");
        assert_eq!(norm("Sǿren"), norm("Søren"));
        assert_eq!(norm("ǽ ǣ Ǽ Ǿ"), "AE AE AE O");
        assert_eq!(norm("ŉ"), "'N");
    }

    #[test]
    fn test_idempotent() {
        for raw in [
            "João  C.Silva",
            "",
            " . ",
            "CG Von Wangenheim",
            "A..B",
            "\u{0149}\u{01E2}\u{01E3}\u{01FC}\u{01FD}\u{01FE}\u{01FF}",
        ] {
            let once = normalize(raw);
            assert_eq!(normalize(&once.to_string()), once, "{raw:?}");
        }
    }
}
