//! Core aggregation: concurrent multi-source fan-out, score, dedup, rank.
//!
//! Queries all configured sources concurrently with the normalised query,
//! scores every record against the original query, merges batches in the
//! fixed source order, filters, deduplicates by title, sorts and truncates.

use std::cmp::Ordering;

use crate::config::AggregatorConfig;
use crate::query::normalize_query;
use crate::source::SourceAdapter;
use crate::types::{RawPaper, ScoredPaper, Source};

use super::dedup::deduplicate_by_title;
use super::scoring::score_paper;

/// Run `query` against every adapter and return the ranked result set.
///
/// # Pipeline
///
/// 1. Normalise the query with [`normalize_query`]
/// 2. Fan out to all adapters concurrently with [`futures::future::join_all`]
/// 3. Turn each source-level failure into an empty batch (see [`fetch_or_empty`])
/// 4. Hand the batches to [`merge_and_rank`] together with the original query
///
/// Never fails: with every source down the result is simply empty.
pub async fn aggregate_with<A: SourceAdapter>(
    query: &str,
    config: &AggregatorConfig,
    adapters: &[A],
) -> Vec<ScoredPaper> {
    let normalized = normalize_query(query);
    tracing::trace!(query, normalized = %normalized, "aggregating");

    let fetches = adapters.iter().map(|adapter| {
        let normalized = normalized.as_str();
        async move {
            let papers = fetch_or_empty(adapter, normalized, config).await;
            (adapter.source(), papers)
        }
    });
    let batches = futures::future::join_all(fetches).await;

    merge_and_rank(query, batches, config)
}

/// Fetch from a single adapter, converting a source-level error into an
/// empty list after logging it.
pub async fn fetch_or_empty<A: SourceAdapter>(
    adapter: &A,
    query: &str,
    config: &AggregatorConfig,
) -> Vec<RawPaper> {
    let source = adapter.source();
    match adapter.fetch(query, config).await {
        Ok(papers) => {
            tracing::debug!(%source, count = papers.len(), "source returned papers");
            papers
        }
        Err(err) => {
            tracing::warn!(%source, error = %err, "source fetch failed");
            Vec::new()
        }
    }
}

/// Merge per-source batches, score them and select the final ranking.
///
/// Batches are concatenated in [`Source::merge_rank`] order regardless of
/// the order they arrive in, so which copy of a duplicated title survives
/// does not depend on network timing. Records are scored against the
/// original `query`, not its normalised form.
pub fn merge_and_rank(
    query: &str,
    mut batches: Vec<(Source, Vec<RawPaper>)>,
    config: &AggregatorConfig,
) -> Vec<ScoredPaper> {
    batches.sort_by_key(|(source, _)| source.merge_rank());

    let scored: Vec<ScoredPaper> = batches
        .into_iter()
        .flat_map(|(_, papers)| papers)
        .map(|paper| score_paper(paper, query))
        .collect();

    let selected = select_top(scored, config.min_relevance, config.max_results);
    tracing::debug!(count = selected.len(), "aggregation complete");
    selected
}

/// Filter, deduplicate, sort and truncate an already-ordered scored list.
///
/// 1. Drop records whose title or link is empty after trimming
/// 2. Drop records scoring below `min_relevance` (a score equal to it is kept)
/// 3. Keep the first record per normalised title
/// 4. Sort by score descending, then by year descending with unknown years last
/// 5. Truncate to `max_results`
///
/// The sort is stable, so fully tied records keep their merge order.
pub fn select_top(
    scored: Vec<ScoredPaper>,
    min_relevance: f64,
    max_results: usize,
) -> Vec<ScoredPaper> {
    let kept: Vec<ScoredPaper> = scored
        .into_iter()
        .filter(|s| !s.paper.title.trim().is_empty() && !s.paper.link.trim().is_empty())
        .filter(|s| s.relevance_score >= min_relevance)
        .collect();

    let mut unique = deduplicate_by_title(kept);

    unique.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.paper.year.unwrap_or(0).cmp(&a.paper.year.unwrap_or(0)))
    });

    unique.truncate(max_results);
    unique
}
