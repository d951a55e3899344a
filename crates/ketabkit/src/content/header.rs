//! Section header detection
//!
//! Catalog pages mark section titles with a parenthesized paragraph that
//! contains one of a few Arabic keywords, e.g. `(قَوْلُهُ بَابُ ...)` or
//! `(كتاب الطهارة)`. Matching happens on the bare letters so vocalized and
//! unvocalized titles are treated alike.

use once_cell::sync::Lazy;
use regex::Regex;

/// Arabic combining marks: Quranic annotation signs, harakat, superscript alef
static DIACRITICS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x{0610}-\x{061A}\x{064B}-\x{065F}\x{0670}]").expect("Invalid diacritics regex")
});

/// "chapter/door", "his saying", "section", "book"
static HEADER_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)باب|قوله|فصل|كتاب").expect("Invalid header marker regex"));

/// Check whether a paragraph is a section header
///
/// The trimmed text must be wrapped in parentheses and contain one of the
/// header keywords once diacritics are removed.
pub fn is_header_block(text: &str) -> bool {
    let trimmed = text.trim();
    if !trimmed.starts_with('(') || !trimmed.ends_with(')') {
        return false;
    }

    let decomposed: String = trimmed.chars().map(base_letter).collect();
    let bare = DIACRITICS.replace_all(&decomposed, "");
    HEADER_MARKERS.is_match(&bare)
}

/// Base letter of a precomposed Arabic hamza/madda letter
///
/// Canonical decomposition of these letters is base letter plus a mark in
/// the stripped range, so only the base letter is kept.
fn base_letter(c: char) -> char {
    match c {
        '\u{0622}' | '\u{0623}' | '\u{0625}' => '\u{0627}',
        '\u{0624}' => '\u{0648}',
        '\u{0626}' => '\u{064A}',
        '\u{06C0}' => '\u{06D5}',
        '\u{06C2}' => '\u{06C1}',
        '\u{06D3}' => '\u{06D2}',
        other => other,
    }
}
