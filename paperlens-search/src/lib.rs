//! # paperlens-search
//!
//! Research-paper search across Google Scholar, arXiv, IEEE Xplore and
//! Semantic Scholar, merged into one relevance-ranked list.
//!
//! ## Design
//!
//! - Scrapes Google Scholar and IEEE Xplore through a scoped HTTP browsing session
//! - Calls the arXiv Atom API and the Semantic Scholar graph API directly
//! - Queries all sources concurrently; a failing source contributes nothing
//!   instead of failing the search
//! - Scores every record against the original query (title and snippet term
//!   overlap, recency, citations), drops weak matches and duplicate titles
//! - User-Agent rotation and randomised request delay for politeness
//!
//! ## Security
//!
//! - No API keys or secrets to leak
//! - No network listeners, this is a library
//! - Queries are logged only at trace level

pub mod browser;
pub mod config;
pub mod error;
pub mod extract;
pub mod http;
pub mod orchestrator;
pub mod query;
pub mod rate_limit;
pub mod source;
pub mod sources;
pub mod types;

pub use config::{AggregatorConfig, SourceEndpoints};
pub use error::{Result, SearchError};
pub use source::SourceAdapter;
pub use sources::BuiltinAdapter;
pub use types::{RawPaper, ScoredPaper, Source};

/// Search every source enabled in `config` and return ranked papers.
///
/// Sources receive the normalised query; scoring uses `query` as given.
/// Returns at most `config.max_results` papers, each scoring at least
/// `config.min_relevance`, with no two sharing a normalised title.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid. Source failures
/// are logged and never surface here: with every source down the result is
/// an empty list.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> paperlens_search::Result<()> {
/// let config = paperlens_search::AggregatorConfig::default();
/// let papers = paperlens_search::aggregate("graph neural networks", &config).await?;
/// for scored in &papers {
///     println!("{:.1} {} ({})", scored.relevance_score, scored.paper.title, scored.paper.link);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn aggregate(query: &str, config: &AggregatorConfig) -> Result<Vec<ScoredPaper>> {
    config.validate()?;
    let adapters: Vec<BuiltinAdapter> = config
        .sources
        .iter()
        .map(|source| BuiltinAdapter::for_source(*source))
        .collect();
    Ok(orchestrator::aggregate::aggregate_with(query, config, &adapters).await)
}

/// Search all sources with the default configuration.
///
/// The default configuration always validates, so this cannot fail.
///
/// # Examples
///
/// ```no_run
/// # async fn example() {
/// let papers = paperlens_search::aggregate_default("deep learning").await;
/// println!("{} papers", papers.len());
/// # }
/// ```
pub async fn aggregate_default(query: &str) -> Vec<ScoredPaper> {
    aggregate(query, &AggregatorConfig::default())
        .await
        .unwrap_or_default()
}
