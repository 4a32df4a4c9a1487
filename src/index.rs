// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The inverted index: word → (document id → term frequency).
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **MIRROR**: every `(word, id)` entry here has a matching entry with the
//!    same frequency in that document's `word_count`, and vice versa.
//! 2. **NON_EMPTY**: every word has at least one posting; a word whose last
//!    posting is removed disappears from the index entirely.
//! 3. **NO_STOP_WORDS**: stop words never enter the index (enforced by the
//!    add path, which filters before calling in here).
//!
//! The key set doubles as the engine's intern pool: `add` hands back the
//! `Arc<str>` it stored, and the caller threads that same handle into the
//! per-document frequency table. One allocation per distinct live word.

use crate::types::{DocumentId, Token};
use std::collections::BTreeMap;

/// Postings for every indexed word, ordered by word and by document id.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    postings: BTreeMap<Token, BTreeMap<DocumentId, f64>>,
}

impl InvertedIndex {
    /// Add `increment` to the term frequency of `word` in document `id`,
    /// creating the posting on first touch. Returns the interned token so the
    /// caller can share the allocation.
    pub(crate) fn add(&mut self, word: &str, id: DocumentId, increment: f64) -> Token {
        let token: Token = match self.postings.get_key_value(word) {
            Some((token, _)) => token.clone(),
            None => Token::from(word),
        };
        *self
            .postings
            .entry(token.clone())
            .or_default()
            .entry(id)
            .or_insert(0.0) += increment;
        token
    }

    /// Drop the posting of `word` for document `id`. The word itself is
    /// dropped once its posting list empties (INVARIANT: NON_EMPTY).
    pub(crate) fn remove(&mut self, word: &str, id: DocumentId) {
        if let Some(list) = self.postings.get_mut(word) {
            list.remove(&id);
            if list.is_empty() {
                self.postings.remove(word);
            }
        }
    }

    /// Posting list of `word`, if any document contains it.
    #[inline]
    pub fn postings(&self, word: &str) -> Option<&BTreeMap<DocumentId, f64>> {
        self.postings.get(word)
    }

    /// The full word → (id → frequency) mapping, ordered by word.
    pub fn as_map(&self) -> &BTreeMap<Token, BTreeMap<DocumentId, f64>> {
        &self.postings
    }
}
