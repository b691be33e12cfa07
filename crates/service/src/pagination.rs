//! Pagination utilities for service layer
//!
//! Pages are zero-based, the way the catalog's HTTP clients address them.

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 2000;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 0-based page index
    pub page: u64,
    /// items per page
    pub size: u64,
}

impl Pagination {
    pub fn new(page: Option<u64>, size: Option<u64>) -> Self {
        Self { page: page.unwrap_or(0), size: size.unwrap_or(DEFAULT_PAGE_SIZE) }
    }

    /// Clamp the page size into `1..=MAX_PAGE_SIZE`; returns `(page, size)`.
    pub fn normalize(self) -> (u64, u64) {
        (self.page, self.size.clamp(1, MAX_PAGE_SIZE))
    }

    /// Rows to skip before this page, or `None` when it does not fit in `u64`.
    pub fn offset(self) -> Option<u64> {
        let (page, size) = self.normalize();
        page.checked_mul(size)
    }

    /// Whether this page starts at or past the last of `total` rows.
    pub fn is_past_end(self, total: u64) -> bool {
        self.offset().map_or(true, |o| o >= total)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self::new(None, None) }
}

/// One page of results plus the totals needed to render navigation metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u64,
    pub size: u64,
}

impl<T> Page<T> {
    /// Cut a page out of an already ordered collection.
    pub fn from_ordered<I>(all: I, pagination: Pagination) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let (page, size) = pagination.normalize();
        let all: Vec<T> = all.into_iter().collect();
        let total_elements = all.len() as u64;
        let items = all
            .into_iter()
            .skip(pagination.offset().map_or(usize::MAX, |o| usize::try_from(o).unwrap_or(usize::MAX)))
            .take(size as usize)
            .collect();
        Self { items, total_elements, total_pages: total_elements.div_ceil(size), number: page, size }
    }
}
