// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! In-memory TF-IDF search over a bounded corpus of short documents.
//!
//! Add documents, query them with a compact plus/minus query language, rank
//! by TF-IDF relevance with a caller-supplied metadata filter, and page
//! through the results. Every query runs either sequentially or fanned out
//! over rayon; both paths return the same ranking.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌───────────────┐
//! │ tokenize.rs  │────▶│  query.rs    │────▶│   engine.rs   │
//! │ (split_words,│     │ (plus/minus  │     │ (SearchEngine,│
//! │  validation) │     │   parsing)   │     │  TF-IDF rank) │
//! └──────────────┘     └──────────────┘     └───────┬───────┘
//!        │                                          │
//!        ▼                                          ▼
//! ┌──────────────┐     ┌──────────────┐     ┌───────────────┐
//! │ stopwords.rs │     │  index.rs    │     │ concurrent.rs │
//! │ (StopWordSet)│     │ (InvertedIdx)│     │ (sharded map  │
//! │              │     │              │     │  for Par mode)│
//! └──────────────┘     └──────────────┘     └───────────────┘
//! ```
//!
//! On top of the engine: [`remove_duplicates`] (corpus maintenance),
//! [`process_queries`]/[`process_queries_joined`] (parallel batches),
//! [`RequestQueue`] (empty-result statistics), and [`paginate`].
//!
//! # Usage
//!
//! ```
//! use skald::{DocumentStatus, ExecutionMode, SearchEngine};
//!
//! let mut engine = SearchEngine::new("and with")?;
//! engine.add_document(1, "funny pet and nasty rat", DocumentStatus::Actual, &[7, 2, 7])?;
//! engine.add_document(2, "funny pet with curly hair", DocumentStatus::Actual, &[1, 2, 3])?;
//!
//! let results = engine.find_top_documents(ExecutionMode::Par, "curly pet -rat")?;
//! assert_eq!(results[0].id, 2);
//! # Ok::<(), skald::SearchError>(())
//! ```

// Module declarations
mod batch;
mod concurrent;
mod dedup;
mod engine;
mod error;
mod index;
mod paginate;
mod query;
mod requests;
mod stopwords;
mod tokenize;
mod types;

// Re-exports for public API
pub use batch::{process_queries, process_queries_joined};
pub use concurrent::ConcurrentMap;
pub use dedup::remove_duplicates;
pub use engine::SearchEngine;
pub use error::{Result, SearchError};
pub use paginate::paginate;
pub use requests::{RequestQueue, REQUESTS_PER_DAY};
pub use stopwords::StopWordSet;
pub use tokenize::{has_control_bytes, split_words};
pub use types::{
    Document, DocumentId, DocumentStatus, ExecutionMode, Token, MAX_RESULT_DOCUMENT_COUNT,
    RELEVANCE_THRESHOLD,
};
