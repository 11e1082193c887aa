//! Paper source implementations.
//!
//! Each module provides a struct implementing [`crate::source::SourceAdapter`]
//! for one source. Google Scholar and IEEE Xplore are scraped through a
//! [`crate::browser::BrowserSession`]; arXiv and Semantic Scholar are
//! plain API calls.

pub mod arxiv;
pub mod google_scholar;
pub mod ieee;
pub mod semantic_scholar;

pub use arxiv::ArxivAdapter;
pub use google_scholar::GoogleScholarAdapter;
pub use ieee::IeeeAdapter;
pub use semantic_scholar::SemanticScholarAdapter;

use scraper::{ElementRef, Selector};

use crate::config::AggregatorConfig;
use crate::error::SearchError;
use crate::extract::clean_text;
use crate::source::SourceAdapter;
use crate::types::{RawPaper, Source};

/// Author line used when a source does not report one.
pub(crate) const UNKNOWN_AUTHORS: &str = "Unknown";

/// One of the built-in adapters, selected by [`Source`].
#[derive(Debug, Clone, Copy)]
pub enum BuiltinAdapter {
    /// See [`GoogleScholarAdapter`].
    GoogleScholar(GoogleScholarAdapter),
    /// See [`ArxivAdapter`].
    Arxiv(ArxivAdapter),
    /// See [`IeeeAdapter`].
    Ieee(IeeeAdapter),
    /// See [`SemanticScholarAdapter`].
    SemanticScholar(SemanticScholarAdapter),
}

impl BuiltinAdapter {
    /// The adapter implementing `source`.
    pub fn for_source(source: Source) -> Self {
        match source {
            Source::GoogleScholar => Self::GoogleScholar(GoogleScholarAdapter),
            Source::Arxiv => Self::Arxiv(ArxivAdapter),
            Source::Ieee => Self::Ieee(IeeeAdapter),
            Source::SemanticScholar => Self::SemanticScholar(SemanticScholarAdapter),
        }
    }
}

impl SourceAdapter for BuiltinAdapter {
    async fn fetch(
        &self,
        query: &str,
        config: &AggregatorConfig,
    ) -> Result<Vec<RawPaper>, SearchError> {
        match self {
            Self::GoogleScholar(adapter) => adapter.fetch(query, config).await,
            Self::Arxiv(adapter) => adapter.fetch(query, config).await,
            Self::Ieee(adapter) => adapter.fetch(query, config).await,
            Self::SemanticScholar(adapter) => adapter.fetch(query, config).await,
        }
    }

    fn source(&self) -> Source {
        match self {
            Self::GoogleScholar(adapter) => adapter.source(),
            Self::Arxiv(adapter) => adapter.source(),
            Self::Ieee(adapter) => adapter.source(),
            Self::SemanticScholar(adapter) => adapter.source(),
        }
    }
}

/// Parse a CSS selector, labelling failures with `what`.
pub(crate) fn selector(css: &str, what: &str) -> Result<Selector, SearchError> {
    Selector::parse(css).map_err(|e| SearchError::Parse(format!("invalid {what} selector: {e:?}")))
}

/// Whitespace-normalised text of the first element matching `sel`.
pub(crate) fn first_text(element: &ElementRef<'_>, sel: &Selector) -> Option<String> {
    element
        .select(sel)
        .next()
        .map(|el| clean_text(&el.text().collect::<String>()))
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_adapter_reports_its_source() {
        for source in Source::all() {
            assert_eq!(BuiltinAdapter::for_source(*source).source(), *source);
        }
    }

    #[test]
    fn builtin_adapter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BuiltinAdapter>();
    }

    #[test]
    fn invalid_selector_is_parse_error() {
        let err = selector("div[", "broken").unwrap_err();
        assert!(err.to_string().contains("invalid broken selector"));
    }
}
