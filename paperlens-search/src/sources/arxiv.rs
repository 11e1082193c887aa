//! arXiv: public Atom API, relevance-sorted.
//!
//! One GET to `/api/query` returns an Atom feed. arXiv has no citation
//! data, so every record carries `citations: 0`.

use quick_xml::de::from_str;
use serde::Deserialize;

use crate::config::AggregatorConfig;
use crate::error::SearchError;
use crate::extract::{clean_text, extract_year};
use crate::http;
use crate::rate_limit::RateLimiter;
use crate::source::SourceAdapter;
use crate::types::{RawPaper, Source};

use super::UNKNOWN_AUTHORS;

/// Results requested per query.
const MAX_RESULTS: usize = 15;

/// arXiv Atom API client.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArxivAdapter;

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AtomEntry {
    id: Option<String>,
    title: Option<String>,
    summary: Option<String>,
    published: Option<String>,
    #[serde(rename = "author")]
    authors: Vec<AtomAuthor>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AtomAuthor {
    name: Option<String>,
}

impl SourceAdapter for ArxivAdapter {
    async fn fetch(
        &self,
        query: &str,
        config: &AggregatorConfig,
    ) -> Result<Vec<RawPaper>, SearchError> {
        tracing::trace!(query, "arXiv fetch");

        let base = config.endpoints.parsed(Source::Arxiv)?;
        let url = base
            .join("/api/query")
            .map_err(|e| SearchError::Config(format!("invalid arXiv query URL: {e}")))?;
        let search_query = format!("all:{query}");
        let max_results = MAX_RESULTS.to_string();

        let client = http::build_client(config)?;
        let request = client.get(url).query(&[
            ("search_query", search_query.as_str()),
            ("start", "0"),
            ("max_results", max_results.as_str()),
            ("sortBy", "relevance"),
            ("sortOrder", "descending"),
        ]);

        RateLimiter::from_config(config).wait().await;
        let xml = http::send_for_text(request, Source::Arxiv).await?;
        parse_arxiv_feed(&xml)
    }

    fn source(&self) -> Source {
        Source::Arxiv
    }
}

/// Parse an arXiv Atom feed into paper records.
///
/// A feed that is not valid XML fails as a whole; individual entries that
/// lack an id or title are logged and skipped.
fn parse_arxiv_feed(xml: &str) -> Result<Vec<RawPaper>, SearchError> {
    let feed: AtomFeed =
        from_str(xml).map_err(|e| SearchError::Parse(format!("invalid atom xml: {e}")))?;

    let papers: Vec<RawPaper> = feed
        .entries
        .into_iter()
        .filter_map(|entry| match parse_entry(entry) {
            Ok(paper) => Some(paper),
            Err(err) => {
                tracing::debug!(error = %err, "skipping arXiv entry");
                None
            }
        })
        .collect();

    tracing::debug!(count = papers.len(), "arXiv results parsed");
    Ok(papers)
}

fn parse_entry(entry: AtomEntry) -> Result<RawPaper, SearchError> {
    let id = entry
        .id
        .map(|id| id.trim().to_owned())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| SearchError::Parse("entry has no id".into()))?;

    // arXiv reports query errors as a single entry pointing at its error docs.
    if id.contains("/api/errors") {
        return Err(SearchError::Parse(format!("arXiv error entry: {id}")));
    }

    let title = entry
        .title
        .map(|t| clean_text(&t))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| SearchError::Parse(format!("entry {id} has no title")))?;

    let names: Vec<String> = entry
        .authors
        .into_iter()
        .filter_map(|author| author.name.map(|n| clean_text(&n)))
        .filter(|name| !name.is_empty())
        .collect();
    let authors = if names.is_empty() {
        UNKNOWN_AUTHORS.to_owned()
    } else {
        names.join(", ")
    };

    Ok(RawPaper {
        title,
        link: normalize_arxiv_url(&id),
        snippet: entry.summary.map(|s| clean_text(&s)).unwrap_or_default(),
        authors,
        year: entry.published.as_deref().and_then(extract_year),
        source: Source::Arxiv,
        citations: 0,
    })
}

fn normalize_arxiv_url(url: &str) -> String {
    match url.strip_prefix("http://arxiv.org/") {
        Some(rest) => format!("https://arxiv.org/{rest}"),
        None => url.to_owned(),
    }
}
