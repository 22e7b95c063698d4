//! Pagination envelope returned by list operations.

use crate::cursor::Cursor;
use crate::window::PageWindow;

/// One page of results plus the cursor for the page after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    next_cursor: Cursor,
}

impl<T> Page<T> {
    /// Assemble a page from items and an explicit next cursor.
    #[must_use]
    pub const fn new(items: Vec<T>, next_cursor: Cursor) -> Self {
        Self { items, next_cursor }
    }

    /// Assemble a page whose next cursor is derived from the directory window.
    #[must_use]
    pub fn from_window(items: Vec<T>, window: PageWindow) -> Self {
        Self::new(items, window.next_cursor())
    }

    /// Assemble the only page of an unpaginated collection.
    #[must_use]
    pub const fn single(items: Vec<T>) -> Self {
        Self::new(items, Cursor::end())
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Cursor for the next page, empty on the final page.
    #[must_use]
    pub const fn next_cursor(&self) -> &Cursor {
        &self.next_cursor
    }

    /// Convert every item while keeping the cursor.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
        }
    }

    /// Split the page into its items and next cursor.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Cursor) {
        (self.items, self.next_cursor)
    }
}

#[cfg(test)]
mod tests {
    //! Envelope construction.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn window_pages_carry_next_cursor() {
        let page = Page::from_window(vec![1, 2], PageWindow::new(1, 2));
        assert_eq!(page.items(), &[1, 2]);
        assert_eq!(page.next_cursor().as_str(), "2");
    }

    #[rstest]
    fn single_pages_end_results() {
        let page = Page::single(vec!["a"]);
        assert!(page.next_cursor().is_end());
    }

    #[rstest]
    fn map_preserves_cursor() {
        let page = Page::new(vec![1, 2], Cursor::new("5")).map(|value| value * 10);
        let (items, cursor) = page.into_parts();
        assert_eq!(items, vec![10, 20]);
        assert_eq!(cursor.as_str(), "5");
    }
}
