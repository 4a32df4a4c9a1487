//! Slicing a result list into fixed-size pages.

use crate::error::{Result, SearchError};

/// Split `items` into pages of `page_size`; the last page may be short.
///
/// Empty input and a zero page size are rejected - both would produce a
/// pagination no UI can render.
pub fn paginate<T>(items: &[T], page_size: usize) -> Result<Vec<&[T]>> {
    if items.is_empty() {
        return Err(SearchError::NothingToPaginate);
    }
    if page_size == 0 {
        return Err(SearchError::ZeroPageSize);
    }
    Ok(items.chunks(page_size).collect())
}
