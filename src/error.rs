// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error type for rejected inputs.
//!
//! Every variant carries the context a caller needs to report the problem
//! without re-deriving it. Errors surface at the operation boundary and are
//! never recovered internally; a rejected write leaves the engine unchanged.

use crate::types::DocumentId;
use std::fmt;

/// What went wrong with a request to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Document ids must be non-negative.
    InvalidDocumentId { id: DocumentId },
    /// The id is already live in the engine.
    DuplicateDocumentId { id: DocumentId },
    /// A byte in `[0x00, 0x1F]` appeared where a word was expected.
    /// `what` names the offending input: document text, a stop word, or a query.
    ControlBytes { what: &'static str },
    /// A query token consisted of a single `-`.
    LoneMinus,
    /// A query token started with `--`.
    DoubleMinus { token: String },
    /// The id is not live, so there is nothing to match against.
    DocumentNotFound { id: DocumentId },
    /// Pagination over an empty result list.
    NothingToPaginate,
    /// Pagination with a page size of zero.
    ZeroPageSize,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::InvalidDocumentId { id } => {
                write!(f, "document id {} is negative", id)
            }
            SearchError::DuplicateDocumentId { id } => {
                write!(f, "document id {} is already in the index", id)
            }
            SearchError::ControlBytes { what } => {
                write!(f, "control byte in {}", what)
            }
            SearchError::LoneMinus => {
                write!(f, "query contains a lone '-' token")
            }
            SearchError::DoubleMinus { token } => {
                write!(f, "query token '{}' starts with '--'", token)
            }
            SearchError::DocumentNotFound { id } => {
                write!(f, "document id {} is not in the index", id)
            }
            SearchError::NothingToPaginate => {
                write!(f, "cannot paginate an empty result list")
            }
            SearchError::ZeroPageSize => {
                write!(f, "cannot paginate with a page size of zero")
            }
        }
    }
}

impl std::error::Error for SearchError {}

pub type Result<T> = std::result::Result<T, SearchError>;
