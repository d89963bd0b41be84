//! Paginated - one page of a query result.

use serde::{Deserialize, Serialize};

/// One page of entities plus the figures needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    /// Entities in this page, at most `page_size` of them.
    pub items: Vec<T>,
    /// Zero-based index of this page.
    pub page_index: usize,
    /// Requested page size.
    pub page_size: usize,
    /// Number of entities matching the filter, before paging.
    pub total_count: usize,
    /// Number of pages needed to hold `total_count` entities.
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    /// Build a page, deriving `total_pages` from `total_count` and `page_size`.
    ///
    /// `page_size` must be non-zero; the accessor validates it first.
    pub fn new(items: Vec<T>, page_index: usize, page_size: usize, total_count: usize) -> Self {
        Self {
            items,
            page_index,
            page_size,
            total_count,
            total_pages: total_pages(total_count, page_size),
        }
    }

    /// True when this page holds no entities.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when a page after this one exists.
    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.total_pages
    }

    /// Transform every item, keeping the paging figures.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            page_index: self.page_index,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }
}

/// `0` for an empty result, otherwise `ceil(total_count / page_size)`.
pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    if total_count == 0 || page_size == 0 {
        0
    } else {
        (total_count - 1) / page_size + 1
    }
}
