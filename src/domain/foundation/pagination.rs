//! Cursor pagination primitives.
//!
//! Lists are scanned newest-first. A cursor is the ID of the last item seen;
//! the next page holds items strictly older than it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Page size used when the caller asks for fewer than one item.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Opaque pagination cursor. Empty means "start from the newest item".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The cursor that starts a scan at the newest item.
    pub fn start() -> Self {
        Self::default()
    }

    pub fn is_start(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Requested page: at most `first` items strictly after `after`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub first: i64,
    #[serde(default)]
    pub after: Cursor,
}

impl PageRequest {
    pub fn new(first: i64, after: Cursor) -> Self {
        Self { first, after }
    }

    /// Replaces a non-positive page size with [`DEFAULT_PAGE_SIZE`].
    pub fn normalize(&mut self) {
        if self.first < 1 {
            self.first = DEFAULT_PAGE_SIZE;
        }
    }

    /// Page size as a `usize`, treating non-positive sizes as the default.
    pub fn limit(&self) -> usize {
        if self.first < 1 {
            DEFAULT_PAGE_SIZE as usize
        } else {
            self.first as usize
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            first: DEFAULT_PAGE_SIZE,
            after: Cursor::start(),
        }
    }
}

/// Metadata returned with every page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub end_cursor: Cursor,
    pub has_next_page: bool,
}

impl PageInfo {
    /// Builds page metadata from the returned page.
    ///
    /// `has_next_page` is true when the page came back full; `end_cursor` is
    /// the last item's cursor, or empty for an empty page.
    pub fn from_page(returned: usize, requested: usize, last: Option<&str>) -> Self {
        Self {
            end_cursor: last.map(Cursor::new).unwrap_or_default(),
            has_next_page: returned >= requested,
        }
    }
}

/// A page of items plus its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_info: PageInfo,
}
