//! Offset/limit pagination primitives shared by orgbook list endpoints.
//!
//! List operations count the filtered set first and fetch one window second,
//! so the envelope carries a `total_count` that is independent of the window
//! position. [`PageRequest`] validates the window parameters once at the
//! adapter boundary; repositories receive it already checked.

use serde::Serialize;
use thiserror::Error;

/// Default window size applied when a request omits `limit`.
pub const DEFAULT_LIMIT: u32 = 10;

/// Upper bound on the window size accepted from callers.
pub const MAX_LIMIT: u32 = 100;

/// Validation failures raised while constructing a [`PageRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// A zero-sized window can never return rows.
    #[error("limit must be at least 1")]
    ZeroLimit,
    /// The requested window exceeds the supported maximum.
    #[error("limit must not exceed {max}")]
    LimitTooLarge {
        /// Maximum window size the endpoint supports.
        max: u32,
    },
}

/// Validated window over an ordered, filtered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    limit: u32,
    offset: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl PageRequest {
    /// Validate and construct a window.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when `limit` is zero or exceeds
    /// [`MAX_LIMIT`]. Any offset is accepted; a window past the end of the
    /// result set is a valid, empty page.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let page = PageRequest::new(2, 4).expect("valid window");
    /// assert_eq!(page.limit(), 2);
    /// assert_eq!(page.offset(), 4);
    /// ```
    pub fn new(limit: u32, offset: u64) -> Result<Self, PageRequestError> {
        if limit == 0 {
            return Err(PageRequestError::ZeroLimit);
        }
        if limit > MAX_LIMIT {
            return Err(PageRequestError::LimitTooLarge { max: MAX_LIMIT });
        }
        Ok(Self { limit, offset })
    }

    /// Window size.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of rows skipped before the window starts.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }
}

/// One window of results plus the size of the whole filtered set.
///
/// `total_count` reflects the filter, not the window; two windows over the
/// same filter report the same count even when their `items` differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Size of the full filtered result set.
    pub total_count: u64,
    /// Rows inside the requested window, in result-set order.
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Build a page from a count and the fetched window.
    pub fn new(total_count: u64, items: Vec<T>) -> Self {
        Self { total_count, items }
    }

    /// Map the items into another representation, preserving the count.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total_count: self.total_count,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}
