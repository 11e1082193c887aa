//! Query normalisation.
//!
//! Sources receive the normalised form (lower-cased, stopwords removed,
//! phrases quoted). Relevance scoring deliberately does **not** use it: it
//! re-tokenises the original query via [`query_terms`] so that common words
//! still count toward title and snippet matches.

use std::collections::HashSet;

/// Words dropped from the query sent to sources.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "in", "is", "of", "on",
    "or", "the", "to", "with",
];

/// Normalise a raw query for source-specific search syntax.
///
/// Lower-cases, splits on whitespace, drops stopwords and wraps any term
/// that still contains a space in double quotes for phrase search. The
/// result may be empty when the input consists only of stopwords; adapters
/// must accept an empty query.
///
/// # Examples
///
/// ```
/// use paperlens_search::query::normalize_query;
///
/// assert_eq!(normalize_query("The Theory of Deep Learning"), "theory deep learning");
/// assert_eq!(normalize_query("of the and"), "");
/// ```
pub fn normalize_query(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let terms: Vec<&str> = lowered
        .split_whitespace()
        .filter(|token| !is_stopword(token))
        .collect();
    join_terms(&terms)
}

/// Join terms with spaces, quoting multi-word terms.
fn join_terms(terms: &[&str]) -> String {
    terms
        .iter()
        .map(|term| {
            if term.contains(' ') {
                format!("\"{term}\"")
            } else {
                (*term).to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether `token` (already lower-cased) is in the stopword list.
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Lower-cased, whitespace-split term set of a query. Stopwords are kept.
pub fn query_terms(raw: &str) -> HashSet<String> {
    tokenize(raw)
}

/// Lower-case `text` and split it into a set of whitespace-separated tokens.
pub(crate) fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}
