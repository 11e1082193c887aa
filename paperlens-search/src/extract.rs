//! Free-text field extraction shared by the source adapters.

use once_cell::sync::Lazy;
use regex::Regex;

/// Four-digit `19xx`/`20xx` year standing alone between word boundaries.
static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("valid regex"));

/// Scholar's citation link text.
static CITED_BY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Cited by\s+(\d+)").expect("valid regex"));

/// Find the first standalone year of the form `19xx` or `20xx`.
///
/// The year must sit between word boundaries, so `"ISBN 12021"` and
/// `"abc2021"` yield nothing. Returns `None` when no year is present;
/// this layer never substitutes 0 for an unknown year.
///
/// # Examples
///
/// ```
/// use paperlens_search::extract::extract_year;
///
/// assert_eq!(extract_year("Smith, J. (2021). Some Venue"), Some(2021));
/// assert_eq!(extract_year("Unknown author, no date"), None);
/// ```
pub fn extract_year(text: &str) -> Option<i32> {
    YEAR_RE
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
}

/// Keep `year` only if it is a plausible four-digit publication year.
pub fn plausible_year(year: Option<i32>) -> Option<i32> {
    year.filter(|y| (1900..=2099).contains(y))
}

/// Parse the count out of a `"Cited by N"` fragment, or 0 if absent.
pub fn extract_citations(text: &str) -> u32 {
    CITED_BY_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Collapse all whitespace runs into single spaces and trim the ends.
pub fn clean_text(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
