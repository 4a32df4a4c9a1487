// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query parsing: raw text in, plus-words and minus-words out.
//!
//! A leading `-` marks a word the document must not contain. Malformed minus
//! tokens (`-` alone, `--` prefixes) and control bytes are rejected before
//! any word is classified, so a bad query never partially parses.
//!
//! The two execution modes parse the same language but differ in cleanup:
//! sequential queries come out sorted and deduplicated, parallel queries keep
//! duplicates (the scorer and matcher dedup on their own, and skipping the
//! sort here keeps the hot path cheap).

use crate::error::{Result, SearchError};
use crate::stopwords::StopWordSet;
use crate::tokenize::{has_control_bytes, split_words};
use crate::types::ExecutionMode;

/// A parsed query: words that must appear and words that must not.
#[derive(Debug, Clone, Default)]
pub(crate) struct Query {
    pub(crate) plus: Vec<Box<str>>,
    pub(crate) minus: Vec<Box<str>>,
}

impl Query {
    /// Parse `text`, dropping stop words in both the plus and minus lists.
    pub(crate) fn parse(
        text: &str,
        stop_words: &StopWordSet,
        mode: ExecutionMode,
    ) -> Result<Query> {
        let mut query = Query::default();
        for token in split_words(text) {
            if token.starts_with("--") {
                return Err(SearchError::DoubleMinus {
                    token: token.to_string(),
                });
            }
            if token == "-" {
                return Err(SearchError::LoneMinus);
            }
            if has_control_bytes(token) {
                return Err(SearchError::ControlBytes { what: "query" });
            }
            let (word, is_minus) = match token.strip_prefix('-') {
                Some(rest) => (rest, true),
                None => (token, false),
            };
            if stop_words.contains(word) {
                continue;
            }
            if is_minus {
                query.minus.push(Box::from(word));
            } else {
                query.plus.push(Box::from(word));
            }
        }
        if mode == ExecutionMode::Seq {
            query.plus.sort_unstable();
            query.plus.dedup();
            query.minus.sort_unstable();
            query.minus.dedup();
        }
        Ok(query)
    }
}
