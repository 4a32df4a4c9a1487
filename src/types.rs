// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of the search engine.
//!
//! These types define how documents, statuses, and ranked results fit
//! together. The constants at the bottom are part of the engine's observable
//! behavior - `RELEVANCE_THRESHOLD` decides when two results count as tied,
//! and `MAX_RESULT_DOCUMENT_COUNT` caps every result page - so changing them
//! changes what callers see.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Identifier of a document in the engine.
///
/// Signed so that the add path can reject negative ids at runtime instead of
/// silently reinterpreting them; every live id is non-negative and unique.
pub type DocumentId = i32;

/// An interned word.
///
/// The engine keeps exactly one allocation per distinct indexed word. The
/// inverted index, every per-document frequency table, and match results all
/// hold clones of the same `Arc<str>`, so a word's storage lives exactly as
/// long as its last posting.
pub type Token = Arc<str>;

/// Moderation state of a document, fixed at add time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

/// A ranked search result.
///
/// `relevance` is the TF-IDF sum over the query's plus-words; `rating` is the
/// truncated average of the ratings supplied at add time. Both participate in
/// ranking: relevance first, rating as the tiebreaker within
/// [`RELEVANCE_THRESHOLD`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub relevance: f64,
    pub rating: i32,
    pub status: DocumentStatus,
}

/// Which evaluation path a query takes.
///
/// Both paths produce the same result set (relevance agrees within
/// [`RELEVANCE_THRESHOLD`]); `Par` fans the scoring loop out over rayon and
/// accumulates through the sharded [`ConcurrentMap`](crate::ConcurrentMap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    #[default]
    Seq,
    Par,
}

/// Maximum number of documents a single query returns.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevance band within which two results count as tied.
///
/// Parallel scoring reorders floating-point additions, so two runs of the
/// same query can differ in the last few ULPs. The band absorbs that:
/// results closer than this are ordered by rating instead.
pub const RELEVANCE_THRESHOLD: f64 = 1e-6;
