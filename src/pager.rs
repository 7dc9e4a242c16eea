//! Page windowing over a fetched collection.
//!
//! [`Pager`] owns the collection and the page cursor.  The cursor only moves
//! through [`Pager::load`], [`Pager::next_page`] and [`Pager::previous_page`];
//! navigation saturates at both ends instead of wrapping or failing, so the
//! Previous / Next controls simply dim at the edges.
//!
//! ## For contributors
//!
//! The `can_go_*` predicates are the single source of truth for navigability.
//! The navigation methods call them rather than re-deriving the bounds, so a
//! caller that checks `can_go_next()` first always predicts what
//! `next_page()` will do.

use std::num::NonZeroUsize;

use thiserror::Error;

/// Items shown per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(6) {
    Some(n) => n,
    None => unreachable!(),
};

/// Rejected arguments to [`Pager::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PagerError {
    /// A page must hold at least one item.
    #[error("page size must be at least 1 (got {0})")]
    InvalidPageSize(usize),
}

/// Snapshot of the pager's cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerState {
    pub total_count: usize,
    pub page_size: usize,
    pub current_page: usize,
}

impl PagerState {
    /// Number of pages; an empty collection still has one (empty) page.
    pub fn total_pages(&self) -> usize {
        self.total_count.div_ceil(self.page_size).max(1)
    }
}

/// Fixed-size paging over an owned collection.
#[derive(Debug, Clone)]
pub struct Pager<T> {
    items: Vec<T>,
    page_size: NonZeroUsize,
    current_page: usize,
}

impl<T> Default for Pager<T> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<T> Pager<T> {
    /// An empty pager with the given page size.
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            items: Vec::new(),
            page_size,
            current_page: 0,
        }
    }

    /// Replace the collection and page size and rewind to the first page.
    ///
    /// A zero `page_size` is rejected and the current collection is left
    /// untouched.
    pub fn load(&mut self, items: Vec<T>, page_size: usize) -> Result<PagerState, PagerError> {
        let page_size = NonZeroUsize::new(page_size).ok_or(PagerError::InvalidPageSize(page_size))?;
        self.page_size = page_size;
        Ok(self.replace(items))
    }

    /// Replace the collection, keeping the page size, and rewind to the
    /// first page.
    pub fn replace(&mut self, items: Vec<T>) -> PagerState {
        self.items = items;
        self.current_page = 0;
        self.state()
    }

    pub fn state(&self) -> PagerState {
        PagerState {
            total_count: self.items.len(),
            page_size: self.page_size.get(),
            current_page: self.current_page,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// Items on the current page.
    pub fn current_window(&self) -> &[T] {
        let start = (self.current_page * self.page_size.get()).min(self.items.len());
        let end = (start + self.page_size.get()).min(self.items.len());
        &self.items[start..end]
    }

    pub fn can_go_next(&self) -> bool {
        (self.current_page + 1) * self.page_size.get() < self.items.len()
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_page > 0
    }

    /// Advance one page; a no-op on the last page.
    pub fn next_page(&mut self) -> PagerState {
        if self.can_go_next() {
            self.current_page += 1;
        }
        self.state()
    }

    /// Go back one page; a no-op on the first page.
    pub fn previous_page(&mut self) -> PagerState {
        if self.can_go_previous() {
            self.current_page -= 1;
        }
        self.state()
    }

    /// `(current page, 1-indexed; total pages)` for display.
    pub fn page_label(&self) -> (usize, usize) {
        (self.current_page + 1, self.state().total_pages())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
