//! Directory page windows and next-cursor derivation.

use crate::cursor::{Cursor, PageNumber};

/// Position reported by the directory for one list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    current: u32,
    total_pages: u32,
}

impl PageWindow {
    /// Capture the directory's `current` and `total_pages` metadata.
    #[must_use]
    pub const fn new(current: u32, total_pages: u32) -> Self {
        Self {
            current,
            total_pages,
        }
    }

    /// Page the directory says it served.
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    /// Number of pages the directory reports in total.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Whether the served page is the final one.
    ///
    /// A directory reporting zero pages has nothing further to serve, as does
    /// one reporting a current page beyond the total.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.current >= self.total_pages
    }

    /// Cursor the orchestrator should send to fetch the following page.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageWindow;
    ///
    /// assert_eq!(PageWindow::new(2, 5).next_cursor().as_str(), "3");
    /// assert!(PageWindow::new(3, 3).next_cursor().is_end());
    /// assert!(PageWindow::new(1, 0).next_cursor().is_end());
    /// ```
    #[must_use]
    pub fn next_cursor(&self) -> Cursor {
        if self.is_last() {
            return Cursor::end();
        }
        // `current < total_pages` here, so `current + 1` cannot overflow.
        PageNumber::new(self.current.saturating_add(1)).map_or_else(Cursor::end, Cursor::for_page)
    }
}
