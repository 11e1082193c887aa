//! Result deduplication by normalised title.
//!
//! Two records are the same paper when their titles match after trimming
//! and lower-casing. The first occurrence wins, so callers control which
//! source's copy survives through the order they pass records in.

use std::collections::HashSet;

use crate::types::ScoredPaper;

/// Dedup key for a title: trimmed and lower-cased.
pub fn title_key(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Keep the first record for each [`title_key`], preserving input order.
pub fn deduplicate_by_title(papers: Vec<ScoredPaper>) -> Vec<ScoredPaper> {
    let mut seen: HashSet<String> = HashSet::with_capacity(papers.len());
    papers
        .into_iter()
        .filter(|scored| seen.insert(title_key(&scored.paper.title)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RawPaper, Source};

    fn make_paper(title: &str, source: Source, score: f64) -> ScoredPaper {
        ScoredPaper {
            paper: RawPaper {
                title: title.to_string(),
                link: format!("https://{}.example/{}", source.name(), title.len()),
                snippet: String::new(),
                authors: "Unknown".to_string(),
                year: None,
                source,
                citations: 0,
            },
            relevance_score: score,
        }
    }

    #[test]
    fn unique_titles_pass_through() {
        let papers = vec![
            make_paper("Alpha", Source::Arxiv, 1.0),
            make_paper("Beta", Source::Ieee, 2.0),
        ];
        assert_eq!(deduplicate_by_title(papers).len(), 2);
    }

    #[test]
    fn first_occurrence_wins_even_with_lower_score() {
        let papers = vec![
            make_paper("Deep Learning", Source::GoogleScholar, 1.0),
            make_paper("deep learning ", Source::Arxiv, 9.0),
        ];
        let deduped = deduplicate_by_title(papers);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].paper.source, Source::GoogleScholar);
        assert!((deduped[0].relevance_score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn order_is_preserved() {
        let papers = vec![
            make_paper("C", Source::Arxiv, 0.0),
            make_paper("A", Source::Arxiv, 0.0),
            make_paper("c", Source::Ieee, 0.0),
            make_paper("B", Source::Arxiv, 0.0),
        ];
        let titles: Vec<String> = deduplicate_by_title(papers)
            .into_iter()
            .map(|p| p.paper.title)
            .collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }

    #[test]
    fn title_key_trims_and_lowercases() {
        assert_eq!(title_key("  Attention Is All You Need\n"), "attention is all you need");
        // Inner whitespace is significant.
        assert_ne!(title_key("Deep  Learning"), title_key("Deep Learning"));
    }

    #[test]
    fn empty_input() {
        assert!(deduplicate_by_title(Vec::new()).is_empty());
    }
}
