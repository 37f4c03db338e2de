//! Paged grid navigation

use std::ops::Range;

/// Items per carousel page on wide viewports
pub const PAGE_SIZE: usize = 4;

/// One-based page cursor over a list of `total` items.
///
/// The current page stays within `[1, total_pages]` (page 1 when empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    total: usize,
    current: usize,
}

impl Paginator {
    pub fn new(page_size: usize, total: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            total,
            current: 1,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Updates the item count, clamping the current page.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.go_to(self.current);
    }

    /// Jumps to `page`, clamped to the valid range.
    pub fn go_to(&mut self, page: usize) {
        self.current = page.clamp(1, self.total_pages().max(1));
    }

    pub fn can_prev(&self) -> bool {
        self.current > 1
    }

    pub fn can_next(&self) -> bool {
        self.current < self.total_pages()
    }

    /// Advances one page; a no-op on the last page.
    pub fn next(&mut self) {
        if self.can_next() {
            self.current += 1;
        }
    }

    /// Goes back one page; a no-op on the first page.
    pub fn prev(&mut self) {
        if self.can_prev() {
            self.current -= 1;
        }
    }

    /// Index range of the current page's items.
    pub fn range(&self) -> Range<usize> {
        let start = ((self.current - 1) * self.page_size).min(self.total);
        let end = (start + self.page_size).min(self.total);
        start..end
    }

    /// The current page's slice of `items`.
    pub fn page<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        &items[range.start.min(items.len())..range.end.min(items.len())]
    }
}
