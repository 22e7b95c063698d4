//! Cursor pagination primitives shared by the connector's list endpoints.
//!
//! The orchestrator pages through collections with a single opaque cursor,
//! while Authentik exposes page-number pagination with `current` and
//! `total_pages` metadata. This crate bridges the two without keeping any
//! server-side state:
//!
//! - [`Cursor`] is the token exchanged with the orchestrator. The empty cursor
//!   is reserved to signal the end of results.
//! - [`PageNumber`] is the one-based page requested from the directory.
//! - [`PageWindow`] is the directory's reported position, from which the next
//!   cursor is derived.
//! - [`Page`] is the envelope handed back to HTTP adapters.
//!
//! ```
//! use pagination::{Cursor, PageWindow};
//!
//! let page = Cursor::new("2").to_page().expect("numeric cursor");
//! assert_eq!(page.get(), 2);
//!
//! let window = PageWindow::new(2, 5);
//! assert_eq!(window.next_cursor().as_str(), "3");
//! assert!(PageWindow::new(5, 5).next_cursor().is_end());
//! ```

mod cursor;
mod envelope;
mod window;

pub use cursor::{Cursor, CursorError, PageNumber};
pub use envelope::Page;
pub use window::PageWindow;

/// Number of records requested from the directory for every page.
///
/// The orchestrator contract gives callers no way to choose a page size, so
/// every list call uses this constant.
pub const PAGE_SIZE: u32 = 100;
