//! Core types for paper records and source identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A paper record as produced by a single source adapter.
///
/// Records are never modified after an adapter returns them; scoring wraps
/// them in a [`ScoredPaper`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPaper {
    /// Paper title. Records with an empty title are dropped during aggregation.
    pub title: String,
    /// Direct URL to the paper, never an intermediate search-results URL.
    pub link: String,
    /// Abstract or excerpt. May be empty.
    pub snippet: String,
    /// Free-text author (and sometimes venue) line. `"Unknown"` when absent.
    pub authors: String,
    /// Publication year. `None` means unknown, which is distinct from any year.
    pub year: Option<i32>,
    /// Which source produced this record.
    pub source: Source,
    /// Citation count, or 0 when the source does not expose one.
    pub citations: u32,
}

/// A [`RawPaper`] paired with its relevance score for a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPaper {
    /// The unmodified source record.
    #[serde(flatten)]
    pub paper: RawPaper,
    /// Relevance to the query, always `>= 0.0`.
    pub relevance_score: f64,
}

/// Paper sources that paperlens-search can query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    /// Google Scholar: scraped result pages, the only source with citation counts.
    GoogleScholar,
    /// arXiv: public Atom API.
    Arxiv,
    /// IEEE Xplore: scraped result pages.
    #[serde(rename = "IEEE")]
    Ieee,
    /// Semantic Scholar: public graph API (JSON).
    SemanticScholar,
}

impl Source {
    /// Returns the human-readable name of this source.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GoogleScholar => "GoogleScholar",
            Self::Arxiv => "Arxiv",
            Self::Ieee => "IEEE",
            Self::SemanticScholar => "SemanticScholar",
        }
    }

    /// Returns all sources in merge order.
    ///
    /// When two sources report the same title, the one listed first here wins.
    pub fn all() -> &'static [Source] {
        &[
            Self::GoogleScholar,
            Self::Arxiv,
            Self::SemanticScholar,
            Self::Ieee,
        ]
    }

    /// Position of this source in [`Source::all`].
    pub fn merge_rank(&self) -> usize {
        match self {
            Self::GoogleScholar => 0,
            Self::Arxiv => 1,
            Self::SemanticScholar => 2,
            Self::Ieee => 3,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_paper() -> RawPaper {
        RawPaper {
            title: "Attention Is All You Need".into(),
            link: "https://arxiv.org/abs/1706.03762".into(),
            snippet: "The dominant sequence transduction models".into(),
            authors: "Ashish Vaswani, Noam Shazeer".into(),
            year: Some(2017),
            source: Source::Arxiv,
            citations: 0,
        }
    }

    #[test]
    fn source_display() {
        assert_eq!(Source::GoogleScholar.to_string(), "GoogleScholar");
        assert_eq!(Source::Arxiv.to_string(), "Arxiv");
        assert_eq!(Source::Ieee.to_string(), "IEEE");
        assert_eq!(Source::SemanticScholar.to_string(), "SemanticScholar");
    }

    #[test]
    fn merge_order_is_scholar_arxiv_semantic_ieee() {
        assert_eq!(
            Source::all(),
            &[
                Source::GoogleScholar,
                Source::Arxiv,
                Source::SemanticScholar,
                Source::Ieee
            ]
        );
        for (position, source) in Source::all().iter().enumerate() {
            assert_eq!(source.merge_rank(), position);
        }
    }

    #[test]
    fn ieee_serializes_upper_case() {
        let json = serde_json::to_string(&Source::Ieee).expect("serialize");
        assert_eq!(json, "\"IEEE\"");
        let decoded: Source = serde_json::from_str("\"IEEE\"").expect("deserialize");
        assert_eq!(decoded, Source::Ieee);
    }

    #[test]
    fn unknown_year_serializes_as_null() {
        let paper = RawPaper {
            year: None,
            ..sample_paper()
        };
        let json = serde_json::to_value(&paper).expect("serialize");
        assert!(json["year"].is_null());
    }

    #[test]
    fn scored_paper_flattens_record_fields() {
        let scored = ScoredPaper {
            paper: sample_paper(),
            relevance_score: 6.5,
        };
        let json = serde_json::to_value(&scored).expect("serialize");
        assert_eq!(json["title"], "Attention Is All You Need");
        assert_eq!(json["source"], "Arxiv");
        assert_eq!(json["year"], 2017);
        assert_eq!(json["relevance_score"], 6.5);
    }
}
