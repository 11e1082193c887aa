//! Semantic Scholar: public graph API (JSON).

use serde::Deserialize;

use crate::config::AggregatorConfig;
use crate::error::SearchError;
use crate::extract::{clean_text, plausible_year};
use crate::http;
use crate::rate_limit::RateLimiter;
use crate::source::SourceAdapter;
use crate::types::{RawPaper, Source};

use super::UNKNOWN_AUTHORS;

/// Results requested per query.
const LIMIT: usize = 10;

/// Fields requested from the paper search endpoint.
const FIELDS: &str = "title,url,abstract,authors,year";

/// Semantic Scholar graph API client.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemanticScholarAdapter;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct S2Paper {
    title: Option<String>,
    url: Option<String>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    #[serde(default)]
    authors: Vec<S2Author>,
    year: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct S2Author {
    name: Option<String>,
}

impl SourceAdapter for SemanticScholarAdapter {
    async fn fetch(
        &self,
        query: &str,
        config: &AggregatorConfig,
    ) -> Result<Vec<RawPaper>, SearchError> {
        tracing::trace!(query, "Semantic Scholar fetch");

        let base = config.endpoints.parsed(Source::SemanticScholar)?;
        let url = base
            .join("/graph/v1/paper/search")
            .map_err(|e| SearchError::Config(format!("invalid Semantic Scholar URL: {e}")))?;
        let limit = LIMIT.to_string();

        let client = http::build_client(config)?;
        let request = client
            .get(url)
            .header("Accept", "application/json")
            .query(&[("query", query), ("fields", FIELDS), ("limit", limit.as_str())]);

        RateLimiter::from_config(config).wait().await;
        let body = http::send_for_text(request, Source::SemanticScholar).await?;
        parse_search_response(&body)
    }

    fn source(&self) -> Source {
        Source::SemanticScholar
    }
}

/// Parse a `/paper/search` response body.
///
/// The body must be a JSON object; each element of `data` is decoded on
/// its own so that one oddly-shaped record does not sink the rest.
fn parse_search_response(body: &str) -> Result<Vec<RawPaper>, SearchError> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("invalid Semantic Scholar JSON: {e}")))?;

    let papers: Vec<RawPaper> = response
        .data
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<S2Paper>(value) {
            Ok(paper) => Some(to_raw_paper(paper)),
            Err(err) => {
                tracing::debug!(error = %err, "skipping Semantic Scholar record");
                None
            }
        })
        .collect();

    tracing::debug!(count = papers.len(), "Semantic Scholar results parsed");
    Ok(papers)
}

fn to_raw_paper(paper: S2Paper) -> RawPaper {
    let names: Vec<String> = paper
        .authors
        .into_iter()
        .filter_map(|author| author.name)
        .map(|name| clean_text(&name))
        .filter(|name| !name.is_empty())
        .collect();

    RawPaper {
        title: paper.title.map(|t| clean_text(&t)).unwrap_or_default(),
        link: paper.url.map(|u| u.trim().to_owned()).unwrap_or_default(),
        snippet: paper.abstract_text.map(|a| clean_text(&a)).unwrap_or_default(),
        authors: if names.is_empty() {
            UNKNOWN_AUTHORS.to_owned()
        } else {
            names.join(", ")
        },
        year: plausible_year(paper.year),
        source: Source::SemanticScholar,
        citations: 0,
    }
}
