//! Paging primitives for list operations.

use serde::{Deserialize, Serialize};

use crate::error::{Failure, Outcome};

/// Page size used when a filter does not specify one.
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Largest page a caller may request.
pub const MAX_PAGE_LIMIT: u32 = 500;

/// Window into an ordered result set.
///
/// Only [`PageRequest::new`] builds one, so the limit is always within
/// `1..=MAX_PAGE_LIMIT`; deserialization goes through the same check.
///
/// ```compile_fail
/// let unchecked = hexkit_domain::page::PageRequest { offset: 0, limit: 0 };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest")]
pub struct PageRequest {
    offset: u64,
    limit: u32,
}

#[derive(Deserialize)]
struct RawPageRequest {
    #[serde(default)]
    offset: u64,
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = Failure;

    fn try_from(raw: RawPageRequest) -> Outcome<Self> {
        Self::new(raw.offset, raw.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a page request, rejecting an empty or oversized window.
    ///
    /// # Errors
    ///
    /// Returns a bad-request [`Failure`] when `limit` is zero or above
    /// [`MAX_PAGE_LIMIT`].
    pub fn new(offset: u64, limit: u32) -> Outcome<Self> {
        if limit == 0 {
            return Err(Failure::bad_request("page limit must be positive"));
        }
        if limit > MAX_PAGE_LIMIT {
            return Err(Failure::bad_request(format!(
                "page limit must not exceed {MAX_PAGE_LIMIT}"
            )));
        }
        Ok(Self { offset, limit })
    }

    /// Number of matching items to skip.
    #[must_use]
    pub fn offset(self) -> u64 {
        self.offset
    }

    /// Maximum number of items in the page, never zero.
    #[must_use]
    pub fn limit(self) -> u32 {
        self.limit
    }
}

/// Caller-defined list filter. Only its paging window is known to the core.
pub trait ListFilter: Send + Sync {
    fn page(&self) -> PageRequest;
}

impl ListFilter for PageRequest {
    fn page(&self) -> PageRequest {
        *self
    }
}

/// One page of a list result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of matching items across all pages.
    pub total: u64,
    pub offset: u64,
    pub limit: u32,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            offset: request.offset(),
            limit: request.limit(),
        }
    }

    /// Whether items remain after this page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.offset.saturating_add(self.items.len() as u64) < self.total
    }

    /// Convert every item, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            offset: self.offset,
            limit: self.limit,
        }
    }
}
