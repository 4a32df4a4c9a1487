//! Batched query execution.
//!
//! Each query already fans out over rayon internally; the batch layer fans
//! out once more across queries. Rayon's work stealing balances the two
//! levels on its own, so there is no tuning knob here.

use crate::engine::SearchEngine;
use crate::error::Result;
use crate::types::{Document, ExecutionMode};
use rayon::prelude::*;

/// Run every query against `engine` in parallel with the default
/// ([`Actual`](crate::DocumentStatus::Actual)) filter.
///
/// The output is positionally aligned with `queries`: `results[i]` answers
/// `queries[i]`. The first failing query aborts the batch.
pub fn process_queries<S>(engine: &SearchEngine, queries: &[S]) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    queries
        .par_iter()
        .map(|query| engine.find_top_documents(ExecutionMode::Par, query.as_ref()))
        .collect()
}

/// Like [`process_queries`], flattened while preserving per-query order.
pub fn process_queries_joined<S>(engine: &SearchEngine, queries: &[S]) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(engine, queries)?
        .into_iter()
        .flatten()
        .collect())
}
