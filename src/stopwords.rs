// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The stop-word set: words ignored by both indexing and querying.
//!
//! Configured once at engine construction and never touched again, which is
//! what makes it safe to share across concurrent readers. Empty words are
//! dropped silently; a control byte anywhere fails construction.

use crate::error::{Result, SearchError};
use crate::tokenize::{has_control_bytes, split_words};
use std::collections::BTreeSet;

/// A deduplicated set of words excluded from the index and from queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWordSet {
    words: BTreeSet<Box<str>>,
}

impl StopWordSet {
    /// Build the set from a single space-separated string.
    pub fn new(text: &str) -> Result<Self> {
        Self::from_words(split_words(text))
    }

    /// Build the set from any container of words.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for word in words {
            let word = word.as_ref();
            if has_control_bytes(word) {
                return Err(SearchError::ControlBytes { what: "stop word" });
            }
            if !word.is_empty() {
                set.insert(Box::from(word));
            }
        }
        Ok(StopWordSet { words: set })
    }

    /// Is `word` a stop word?
    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
