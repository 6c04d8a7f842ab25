//! Fixed-size page windows over a filtered view. Pages are 1-based.

use std::{num::NonZeroUsize, ops::Range};

pub const CLIENT_PAGE_SIZE: usize = 8;
pub const COMPACT_CLIENT_PAGE_SIZE: usize = 7;
pub const SERVICE_PAGE_SIZE: usize = 6;

/// Page count for `len` items; never less than one so pager controls stay defined.
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get()).max(1)
}

/// Index range of `page` clipped to `len`; pages past the end are empty.
pub fn page_bounds(len: usize, page: usize, page_size: NonZeroUsize) -> Range<usize> {
    let start = page
        .saturating_sub(1)
        .saturating_mul(page_size.get())
        .min(len);
    let end = start.saturating_add(page_size.get()).min(len);
    start..end
}

pub fn page_slice<T>(items: &[T], page: usize, page_size: NonZeroUsize) -> &[T] {
    &items[page_bounds(items.len(), page, page_size)]
}

/// Page that shows the item at `index`.
pub fn page_for_index(index: usize, page_size: NonZeroUsize) -> usize {
    index / page_size.get() + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: NonZeroUsize,
}

impl Pager {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self { page: 1, page_size }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn total_pages(&self, len: usize) -> usize {
        total_pages(len, self.page_size)
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Advances one page; returns false at the last page.
    pub fn next(&mut self, len: usize) -> bool {
        if self.page < self.total_pages(len) {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Goes back one page; returns false at page 1.
    pub fn prev(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn go_to(&mut self, page: usize, len: usize) {
        self.page = page.clamp(1, self.total_pages(len));
    }

    pub fn show_index(&mut self, index: usize) {
        self.page = page_for_index(index, self.page_size);
    }

    /// Pulls the current page back inside `1..=total_pages(len)`.
    pub fn clamp(&mut self, len: usize) {
        self.go_to(self.page, len);
    }

    pub fn bounds(&self, len: usize) -> Range<usize> {
        page_bounds(len, self.page, self.page_size)
    }
}

#[cfg(test)]
#[path = "tests/pagination_tests.rs"]
mod tests;
