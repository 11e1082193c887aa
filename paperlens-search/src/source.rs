//! Trait definition for pluggable paper sources.
//!
//! Each source (Google Scholar, arXiv, IEEE Xplore, Semantic Scholar)
//! implements [`SourceAdapter`] to map its own result format into
//! [`RawPaper`] records.

use crate::config::AggregatorConfig;
use crate::error::SearchError;
use crate::types::{RawPaper, Source};

/// A pluggable paper source.
///
/// Implementors fetch results for a query and map them to [`RawPaper`]
/// values tagged with their [`Source`]. Two failure granularities apply:
///
/// - A single malformed result is logged and skipped inside the adapter;
///   it never fails the whole fetch.
/// - A source-level failure (network error, non-2xx status, unparsable
///   page or feed) is returned as `Err`. The orchestrator turns it into an
///   empty list, see [`crate::orchestrator::aggregate::fetch_or_empty`].
///
/// All implementations must be `Send + Sync` for concurrent fetches.
pub trait SourceAdapter: Send + Sync {
    /// Fetch papers for an already-normalised query.
    ///
    /// The query may be empty if the raw query consisted only of stopwords.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the source as a whole cannot be reached
    /// or its response cannot be parsed.
    fn fetch(
        &self,
        query: &str,
        config: &AggregatorConfig,
    ) -> impl std::future::Future<Output = Result<Vec<RawPaper>, SearchError>> + Send;

    /// Returns which [`Source`] this implementation represents.
    fn source(&self) -> Source;
}
