// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Request-rate bookkeeping over a sliding one-day window.
//!
//! The queue wraps a borrowed engine, forwards each find request to it, and
//! remembers only whether each of the last [`REQUESTS_PER_DAY`] requests came
//! back empty. Product dashboards use the empty-result count to spot queries
//! the corpus cannot answer.
//!
//! The wrapper needs nothing from the engine beyond `find_top_documents*`
//! and the guarantee that the engine outlives it - which the borrow makes a
//! compile-time fact rather than a comment.

use crate::engine::SearchEngine;
use crate::error::Result;
use crate::types::{Document, DocumentId, DocumentStatus, ExecutionMode};
use std::collections::VecDeque;

/// Window length: one request per minute for a day.
pub const REQUESTS_PER_DAY: usize = 1440;

/// A sliding-window wrapper counting empty-result queries.
pub struct RequestQueue<'a> {
    engine: &'a SearchEngine,
    /// One flag per windowed request: did it return nothing?
    window: VecDeque<bool>,
    no_result_requests: usize,
}

impl<'a> RequestQueue<'a> {
    pub fn new(engine: &'a SearchEngine) -> Self {
        RequestQueue {
            engine,
            window: VecDeque::new(),
            no_result_requests: 0,
        }
    }

    /// Forward to the engine's default ([`DocumentStatus::Actual`]) form.
    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        let results = self
            .engine
            .find_top_documents(ExecutionMode::Seq, raw_query)?;
        self.record(&results);
        Ok(results)
    }

    /// Forward to the engine's status form.
    pub fn add_find_request_with_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        let results =
            self.engine
                .find_top_documents_with_status(ExecutionMode::Seq, raw_query, status)?;
        self.record(&results);
        Ok(results)
    }

    /// Forward to the engine's predicate form.
    pub fn add_find_request_with<P>(
        &mut self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let results =
            self.engine
                .find_top_documents_with(ExecutionMode::Seq, raw_query, predicate)?;
        self.record(&results);
        Ok(results)
    }

    /// How many of the windowed requests returned no documents.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_requests
    }

    /// Record one completed request, expiring the oldest once the window is
    /// full. Failed requests never reach here - errors propagate before
    /// anything is recorded.
    fn record(&mut self, results: &[Document]) {
        if self.window.len() == REQUESTS_PER_DAY {
            if self.window.pop_front() == Some(true) {
                self.no_result_requests -= 1;
            }
        }
        let is_empty = results.is_empty();
        if is_empty {
            self.no_result_requests += 1;
        }
        self.window.push_back(is_empty);
    }
}
