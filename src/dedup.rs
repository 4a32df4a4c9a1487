// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Duplicate elimination over the engine's public surface.
//!
//! Two documents are duplicates when they index the same set of words -
//! frequencies, ratings, and statuses are deliberately ignored. The earliest
//! id wins; everything after it with the same word-set goes.
//!
//! **Invariant**: one full-corpus scan, ascending id order. Scanning in
//! ascending order is what makes "first id seen" well-defined.

use crate::engine::SearchEngine;
use crate::types::{DocumentId, Token};
use std::collections::{BTreeSet, HashSet};

/// Remove every document whose word-set duplicates an earlier document's.
///
/// Prints `Found duplicate document id <id>` to stdout for each duplicate as
/// it is discovered, and returns the removed ids (ascending) so embedders
/// that want different reporting have the data.
pub fn remove_duplicates(engine: &mut SearchEngine) -> Vec<DocumentId> {
    let mut seen: HashSet<BTreeSet<Token>> = HashSet::new();
    let mut duplicates: Vec<DocumentId> = Vec::new();

    for id in engine.document_ids() {
        let words: BTreeSet<Token> = engine.word_frequencies(id).keys().cloned().collect();
        if !seen.insert(words) {
            println!("Found duplicate document id {}", id);
            duplicates.push(id);
        }
    }

    for &id in &duplicates {
        engine.remove_document(id);
    }
    duplicates
}
