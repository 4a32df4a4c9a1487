// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search engine: ingestion, TF-IDF scoring, ranking, and matching.
//!
//! Everything culminates here. Documents go in through [`add_document`],
//! queries come back ranked through [`find_top_documents_with`] and friends,
//! and [`match_document`] explains which query words hit a given document.
//!
//! # Concurrency contract
//!
//! Readers (`find_top_documents*`, `match_document`, `word_frequencies`,
//! `document_count`, `word_to_document_freqs`, `document_ids`) take `&self`
//! and may run concurrently from any number of threads. Writers
//! (`add_document`, `remove_document`) take `&mut self`, so the borrow
//! checker enforces the writers-exclude-everyone rule; no internal write
//! lock exists or is needed. During a query the only shared mutable state is
//! the per-query [`ConcurrentMap`], which is sharded and locked per bucket.
//!
//! # Scoring
//!
//! `relevance(d) = Σ tf(w, d) · idf(w)` over the query's plus-words, where
//! `tf` is the stored term frequency and `idf(w) = ln(live_docs /
//! docs_containing_w)`, computed on the fly from current state. A document
//! containing any minus-word is excluded entirely, not down-weighted. The
//! caller's predicate is applied at the accumulation point, so filtered
//! documents never occupy accumulator slots.
//!
//! [`add_document`]: SearchEngine::add_document
//! [`find_top_documents_with`]: SearchEngine::find_top_documents_with
//! [`match_document`]: SearchEngine::match_document

use crate::concurrent::ConcurrentMap;
use crate::error::{Result, SearchError};
use crate::index::InvertedIndex;
use crate::query::Query;
use crate::stopwords::StopWordSet;
use crate::tokenize::{has_control_bytes, split_words};
use crate::types::{
    Document, DocumentId, DocumentStatus, ExecutionMode, Token, MAX_RESULT_DOCUMENT_COUNT,
    RELEVANCE_THRESHOLD,
};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Everything the engine stores per live document.
#[derive(Debug, Clone)]
struct DocumentData {
    rating: i32,
    status: DocumentStatus,
    /// Word → term frequency. Keys are the same `Arc<str>` handles the
    /// inverted index holds (INVARIANT: MIRROR in `index.rs`).
    word_count: BTreeMap<Token, f64>,
}

/// An in-memory full-text index over short documents.
///
/// # Example
///
/// ```
/// use skald::{DocumentStatus, ExecutionMode, SearchEngine};
///
/// let mut engine = SearchEngine::new("in the")?;
/// engine.add_document(42, "cat in the city", DocumentStatus::Actual, &[1, 2, 3])?;
///
/// let results = engine.find_top_documents(ExecutionMode::Seq, "cat -dog")?;
/// assert_eq!(results[0].id, 42);
/// # Ok::<(), skald::SearchError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    stop_words: StopWordSet,
    index: InvertedIndex,
    documents: BTreeMap<DocumentId, DocumentData>,
}

impl SearchEngine {
    /// Create an engine with stop words given as one space-separated string.
    pub fn new(stop_words: &str) -> Result<Self> {
        Ok(SearchEngine {
            stop_words: StopWordSet::new(stop_words)?,
            ..SearchEngine::default()
        })
    }

    /// Create an engine with stop words from any container of strings.
    pub fn with_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(SearchEngine {
            stop_words: StopWordSet::from_words(stop_words)?,
            ..SearchEngine::default()
        })
    }

    /// Index a document.
    ///
    /// Rejects negative ids, ids that are already live, and text containing
    /// control bytes; a rejected call leaves the engine untouched. Stop words
    /// are dropped before counting, and each remaining occurrence contributes
    /// `1/N` to its word's term frequency, so every document's frequencies
    /// sum to exactly 1. A document with nothing but stop words is still
    /// recorded (it counts toward IDF's denominator-side document total) but
    /// writes no postings.
    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id < 0 {
            return Err(SearchError::InvalidDocumentId { id });
        }
        if self.documents.contains_key(&id) {
            return Err(SearchError::DuplicateDocumentId { id });
        }
        if has_control_bytes(text) {
            return Err(SearchError::ControlBytes {
                what: "document text",
            });
        }

        let words: Vec<&str> = split_words(text)
            .into_iter()
            .filter(|word| !self.stop_words.contains(word))
            .collect();

        let mut word_count: BTreeMap<Token, f64> = BTreeMap::new();
        if !words.is_empty() {
            let inv_word_count = 1.0 / words.len() as f64;
            for word in words {
                let token = self.index.add(word, id, inv_word_count);
                *word_count.entry(token).or_insert(0.0) += inv_word_count;
            }
        }

        self.documents.insert(
            id,
            DocumentData {
                rating: average_rating(ratings),
                status,
                word_count,
            },
        );
        Ok(())
    }

    /// Remove a document. Unknown ids are a silent no-op.
    pub fn remove_document(&mut self, id: DocumentId) {
        let Some(data) = self.documents.remove(&id) else {
            return;
        };
        // The interned keys in `data` keep each word alive while its
        // postings unwind, so removal order cannot dangle anything.
        for word in data.word_count.keys() {
            self.index.remove(word, id);
        }
    }

    /// Number of live documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Live document ids in ascending order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.documents.keys().copied()
    }

    /// Word → term frequency for one document; an empty map for unknown ids.
    pub fn word_frequencies(&self, id: DocumentId) -> &BTreeMap<Token, f64> {
        static EMPTY: BTreeMap<Token, f64> = BTreeMap::new();
        self.documents
            .get(&id)
            .map(|data| &data.word_count)
            .unwrap_or(&EMPTY)
    }

    /// The whole inverted index: word → (document id → term frequency).
    pub fn word_to_document_freqs(&self) -> &BTreeMap<Token, BTreeMap<DocumentId, f64>> {
        self.index.as_map()
    }

    /// Top documents with status [`DocumentStatus::Actual`].
    pub fn find_top_documents(&self, mode: ExecutionMode, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with_status(mode, raw_query, DocumentStatus::Actual)
    }

    /// Top documents whose status equals `status`.
    pub fn find_top_documents_with_status(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with(mode, raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    /// Top documents accepted by `predicate`.
    ///
    /// Results are sorted by descending relevance; results within
    /// [`RELEVANCE_THRESHOLD`] of each other count as tied and are ordered by
    /// descending rating instead. At most [`MAX_RESULT_DOCUMENT_COUNT`]
    /// results come back. The predicate sees `(id, status, rating)` and is
    /// never retained past the call.
    pub fn find_top_documents_with<P>(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = Query::parse(raw_query, &self.stop_words, mode)?;
        let relevance = match mode {
            ExecutionMode::Seq => self.score_sequential(&query, &predicate),
            ExecutionMode::Par => self.score_parallel(&query, &predicate),
        };

        let mut results: Vec<Document> = relevance
            .into_iter()
            .filter_map(|(id, relevance)| {
                self.documents.get(&id).map(|data| Document {
                    id,
                    relevance,
                    rating: data.rating,
                    status: data.status,
                })
            })
            .collect();
        results.sort_by(compare_documents);
        results.truncate(MAX_RESULT_DOCUMENT_COUNT);
        Ok(results)
    }

    /// Which of the query's plus-words appear in document `id`?
    ///
    /// Returns the matching plus-words sorted and deduplicated, together with
    /// the document's status. If any minus-word appears in the document, the
    /// word list is empty. Unknown ids are an error - check
    /// [`document_ids`](SearchEngine::document_ids) first when in doubt.
    pub fn match_document(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<(Vec<Token>, DocumentStatus)> {
        let Some(data) = self.documents.get(&id) else {
            return Err(SearchError::DocumentNotFound { id });
        };
        let query = Query::parse(raw_query, &self.stop_words, mode)?;

        if query
            .minus
            .iter()
            .any(|word| data.word_count.contains_key(&**word))
        {
            return Ok((Vec::new(), data.status));
        }

        let matched_token = |word: &Box<str>| {
            data.word_count
                .get_key_value(&**word)
                .map(|(token, _)| token.clone())
        };
        let mut matched: Vec<Token> = match mode {
            ExecutionMode::Seq => query.plus.iter().filter_map(matched_token).collect(),
            ExecutionMode::Par => query.plus.par_iter().filter_map(matched_token).collect(),
        };
        matched.sort_unstable();
        matched.dedup();
        Ok((matched, data.status))
    }

    /// Verify the cross-structure invariants. Wired into the test suites;
    /// cheap enough to call after every mutation in debug builds.
    #[cfg(any(debug_assertions, test))]
    pub fn check_index_well_formed(&self) -> bool {
        // Index side: no stop words, no empty posting lists, every posting
        // mirrored (with the identical interned key) in its document.
        for (word, postings) in self.index.as_map() {
            if self.stop_words.contains(word) || postings.is_empty() {
                return false;
            }
            for (&id, &term_freq) in postings {
                let Some(data) = self.documents.get(&id) else {
                    return false;
                };
                match data.word_count.get_key_value(&**word) {
                    Some((token, &mirrored)) => {
                        if mirrored != term_freq || !Token::ptr_eq(token, word) {
                            return false;
                        }
                    }
                    None => return false,
                }
            }
        }
        // Document side: every counted word mirrored in the index, and term
        // frequencies sum to 1 whenever anything was indexed.
        for (&id, data) in &self.documents {
            if !data.word_count.is_empty() {
                let total: f64 = data.word_count.values().sum();
                if (total - 1.0).abs() > 1e-9 {
                    return false;
                }
            }
            for (word, &term_freq) in &data.word_count {
                if self.index.postings(word).and_then(|list| list.get(&id))
                    != Some(&term_freq)
                {
                    return false;
                }
            }
        }
        true
    }

    /// `ln(live documents / documents containing the word)`.
    ///
    /// Only called with `postings_len >= 1`, so the quotient is finite.
    fn inverse_document_freq(&self, postings_len: usize) -> f64 {
        (self.documents.len() as f64 / postings_len as f64).ln()
    }

    fn score_sequential<P>(&self, query: &Query, predicate: &P) -> BTreeMap<DocumentId, f64>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let mut relevance: BTreeMap<DocumentId, f64> = BTreeMap::new();
        for word in &query.plus {
            let Some(postings) = self.index.postings(word) else {
                continue;
            };
            let idf = self.inverse_document_freq(postings.len());
            for (&id, &term_freq) in postings {
                let Some(data) = self.documents.get(&id) else {
                    continue;
                };
                if predicate(id, data.status, data.rating) {
                    *relevance.entry(id).or_insert(0.0) += term_freq * idf;
                }
            }
        }
        for word in &query.minus {
            let Some(postings) = self.index.postings(word) else {
                continue;
            };
            for &id in postings.keys() {
                relevance.remove(&id);
            }
        }
        relevance
    }

    fn score_parallel<P>(&self, query: &Query, predicate: &P) -> BTreeMap<DocumentId, f64>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        // One bucket per live document: scattered ids rarely contend.
        let accumulator = ConcurrentMap::new(self.documents.len());

        // Parallel-mode parsing elides dedup; restore it here so a repeated
        // plus-word cannot contribute twice.
        let mut plus: Vec<&str> = query.plus.iter().map(AsRef::as_ref).collect();
        plus.sort_unstable();
        plus.dedup();

        plus.par_iter().for_each(|word| {
            let Some(postings) = self.index.postings(word) else {
                return;
            };
            let idf = self.inverse_document_freq(postings.len());
            for (&id, &term_freq) in postings {
                let Some(data) = self.documents.get(&id) else {
                    continue;
                };
                if predicate(id, data.status, data.rating) {
                    *accumulator.slot(id) += term_freq * idf;
                }
            }
        });

        // Duplicate minus-words are harmless: removal is idempotent.
        query.minus.par_iter().for_each(|word| {
            if let Some(postings) = self.index.postings(word) {
                for &id in postings.keys() {
                    accumulator.remove(id);
                }
            }
        });

        accumulator.into_ordered()
    }
}

/// Descending relevance; ties within [`RELEVANCE_THRESHOLD`] fall back to
/// descending rating. The order of results tying on both is unspecified.
fn compare_documents(a: &Document, b: &Document) -> Ordering {
    if (a.relevance - b.relevance).abs() < RELEVANCE_THRESHOLD {
        b.rating.cmp(&a.rating)
    } else {
        b.relevance.partial_cmp(&a.relevance).unwrap_or(Ordering::Equal)
    }
}

/// Truncated-division average, 0 for an empty slice. Summed in `i64` so
/// pathological rating lists cannot overflow on the way to the average.
fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&rating| rating as i64).sum();
    (sum / ratings.len() as i64) as i32
}
