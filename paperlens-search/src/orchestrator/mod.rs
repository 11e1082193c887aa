//! Aggregation pipeline: concurrent fetch, score, deduplicate, rank.
//!
//! This module fans a normalised query out to every enabled source,
//! scores each record against the original query, drops duplicate titles
//! in a fixed source order, and returns a sorted, truncated result set.

pub mod aggregate;
pub mod dedup;
pub mod scoring;
