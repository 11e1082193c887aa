//! Query relevance scoring for paper records.
//!
//! Assigns scores based on:
//! - Term overlap between the query and the title (weight 3)
//! - Term overlap between the query and the snippet (weight 2)
//! - Substring hits of query terms in title (+1) and snippet (+0.5)
//! - Recency (+1 for papers from the last five years)
//! - Citations (+1 per 100, capped at +2)
//!
//! The substring pass counts the same words as the overlap passes a second
//! time. That double counting is part of the observed ranking and is kept.

use chrono::Datelike;

use crate::query::{query_terms, tokenize};
use crate::types::{RawPaper, ScoredPaper};

/// Weight per query term found among the title tokens.
const TITLE_TERM_WEIGHT: f64 = 3.0;
/// Weight per query term found among the snippet tokens.
const SNIPPET_TERM_WEIGHT: f64 = 2.0;
/// Bonus per query term occurring anywhere in the title text.
const TITLE_SUBSTRING_BONUS: f64 = 1.0;
/// Bonus per query term occurring anywhere in the snippet text.
const SNIPPET_SUBSTRING_BONUS: f64 = 0.5;
/// Bonus for papers published within [`RECENT_YEARS`] of the current year.
const RECENCY_BONUS: f64 = 1.0;
const RECENT_YEARS: i32 = 5;
/// Citations per bonus point, and the cap on the citation bonus.
const CITATIONS_PER_POINT: f64 = 100.0;
const MAX_CITATION_BONUS: f64 = 2.0;

/// Score `paper` against the original, unnormalised `query`.
///
/// # Scoring Formula
///
/// ```text
/// Q       = lower-cased whitespace tokens of the query
/// score   = 3 * |Q ∩ tokens(title)|
///         + 2 * |Q ∩ tokens(snippet)|                      (snippet non-empty)
///         + Σ q∈Q [q ⊂ title] + 0.5 * Σ q∈Q [q ⊂ snippet]  (snippet non-empty)
///         + 1                                             (year ≥ current_year − 5)
///         + min(citations / 100, 2)
/// ```
///
/// Pure and deterministic for a fixed `current_year`. Missing snippet,
/// unknown year and zero citations each contribute nothing.
pub fn relevance_score(paper: &RawPaper, query: &str, current_year: i32) -> f64 {
    let terms = query_terms(query);
    let mut score = 0.0;

    let title_tokens = tokenize(&paper.title);
    score += terms.intersection(&title_tokens).count() as f64 * TITLE_TERM_WEIGHT;

    if !paper.snippet.is_empty() {
        let snippet_tokens = tokenize(&paper.snippet);
        score += terms.intersection(&snippet_tokens).count() as f64 * SNIPPET_TERM_WEIGHT;

        let title_lower = paper.title.to_lowercase();
        let snippet_lower = paper.snippet.to_lowercase();
        for term in &terms {
            if title_lower.contains(term.as_str()) {
                score += TITLE_SUBSTRING_BONUS;
            }
            if snippet_lower.contains(term.as_str()) {
                score += SNIPPET_SUBSTRING_BONUS;
            }
        }
    }

    if paper
        .year
        .is_some_and(|year| year >= current_year - RECENT_YEARS)
    {
        score += RECENCY_BONUS;
    }

    score += (f64::from(paper.citations) / CITATIONS_PER_POINT).min(MAX_CITATION_BONUS);
    score
}

/// Wrap `paper` with its score for `query`, using the current calendar year.
pub fn score_paper(paper: RawPaper, query: &str) -> ScoredPaper {
    let relevance_score = relevance_score(&paper, query, current_year());
    ScoredPaper {
        paper,
        relevance_score,
    }
}

/// The current UTC calendar year.
pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}
