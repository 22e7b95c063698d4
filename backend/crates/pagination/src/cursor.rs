//! Orchestrator cursors and the page numbers they encode.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One-based page number understood by the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    /// The first page, used whenever a caller supplies no cursor.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Build a page number, rejecting zero.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageNumber;
    ///
    /// assert_eq!(PageNumber::new(4).map(PageNumber::get), Some(4));
    /// assert!(PageNumber::new(0).is_none());
    /// ```
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(inner) => Some(Self(inner)),
            None => None,
        }
    }

    /// Raw page number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// The page after this one, or `None` when the counter would overflow.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(inner) => Some(Self(inner)),
            None => None,
        }
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised when a caller-supplied cursor cannot be mapped to a page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    /// The cursor is not a decimal page number.
    #[error("cursor '{cursor}' is not a page number")]
    NotNumeric {
        /// Cursor exactly as supplied by the caller.
        cursor: String,
    },
    /// The cursor parsed to page zero, which the directory does not serve.
    #[error("cursor must reference a page greater than zero")]
    ZeroPage,
}

/// Opaque pagination token exchanged with the orchestrator.
///
/// ## Invariants
/// - The empty cursor means "no further pages". It is produced for the final
///   page and only for the final page.
/// - Non-empty cursors produced by this crate are decimal page numbers, so a
///   caller may hand back exactly the string it received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Wrap a raw cursor value received from a caller.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The reserved end-of-results cursor.
    #[must_use]
    pub const fn end() -> Self {
        Self(String::new())
    }

    /// Cursor resuming at `page`, rendered as a decimal integer.
    #[must_use]
    pub fn for_page(page: PageNumber) -> Self {
        Self(page.to_string())
    }

    /// Borrow the token.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether this cursor signals the end of results.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.0.is_empty()
    }

    /// Translate the cursor into the page to request from the directory.
    ///
    /// An empty cursor maps to [`PageNumber::FIRST`].
    ///
    /// # Errors
    /// Returns [`CursorError::NotNumeric`] when the cursor is not a decimal
    /// number that fits a `u32`, and [`CursorError::ZeroPage`] for `"0"`.
    ///
    /// # Examples
    /// ```
    /// use pagination::{Cursor, CursorError, PageNumber};
    ///
    /// assert_eq!(Cursor::end().to_page(), Ok(PageNumber::FIRST));
    /// assert_eq!(Cursor::new("7").to_page().map(PageNumber::get), Ok(7));
    /// assert!(matches!(
    ///     Cursor::new("abc").to_page(),
    ///     Err(CursorError::NotNumeric { .. })
    /// ));
    /// ```
    pub fn to_page(&self) -> Result<PageNumber, CursorError> {
        if self.is_end() {
            return Ok(PageNumber::FIRST);
        }
        let value = self
            .0
            .parse::<u32>()
            .map_err(|_| CursorError::NotNumeric {
                cursor: self.0.clone(),
            })?;
        PageNumber::new(value).ok_or(CursorError::ZeroPage)
    }

    /// Resolve an optional query parameter into a page number.
    ///
    /// Absent and empty cursors both select the first page.
    ///
    /// # Errors
    /// Propagates the failures of [`Cursor::to_page`].
    pub fn page_from_query(cursor: Option<&str>) -> Result<PageNumber, CursorError> {
        cursor.map_or(Ok(PageNumber::FIRST), |raw| Self::new(raw).to_page())
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<PageNumber> for Cursor {
    fn from(page: PageNumber) -> Self {
        Self::for_page(page)
    }
}
