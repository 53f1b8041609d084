//! Pagination state for canvas navigation.
//!
//! A `PageState` is the arithmetic half of the navigation protocol:
//! given a page number, a page size, and an item count it derives
//! everything the renderer needs (bounds, pager enablement) and
//! serializes to and from the `p{page}-s{size}` suffix carried in
//! button identifiers.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::error::{NavError, NavResult};

/// Exact pattern for a pagination suffix.
fn suffix_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^p(\d+)-s(\d+)$").unwrap())
}

/// Validated pagination state.
///
/// `page_number` is 0-indexed. Page numbers that are stale relative to
/// the current item count are allowed to exist (they arrive from
/// round-tripped identifiers); callers run [`PageState::clamp`] before
/// trusting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    page_number: u64,
    page_size: u64,
    total_items: u64,
}

impl PageState {
    /// Creates a page state, validating the invariants.
    ///
    /// Takes signed integers because the values usually arrive off the
    /// wire. Fails with `InvalidPageState` when `page_number < 0`,
    /// `page_size < 1`, or `total_items < 0`.
    pub fn new(page_number: i64, page_size: i64, total_items: i64) -> NavResult<Self> {
        if page_number < 0 {
            return Err(NavError::InvalidPageState(format!(
                "page_number must be >= 0, got {page_number}"
            )));
        }
        if page_size < 1 {
            return Err(NavError::InvalidPageState(format!(
                "page_size must be >= 1, got {page_size}"
            )));
        }
        if total_items < 0 {
            return Err(NavError::InvalidPageState(format!(
                "total_items must be >= 0, got {total_items}"
            )));
        }
        Ok(Self {
            page_number: page_number as u64,
            page_size: page_size as u64,
            total_items: total_items as u64,
        })
    }

    /// The first page with a given size and no items yet. Sizes below
    /// 1 are raised to 1 so the invariant holds.
    pub fn first(page_size: u64) -> Self {
        Self {
            page_number: 0,
            page_size: page_size.max(1),
            total_items: 0,
        }
    }

    pub fn page_number(&self) -> u64 {
        self.page_number
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Number of pages needed for the current item count. Zero items
    /// yield zero pages.
    pub fn total_pages(&self) -> u64 {
        self.total_items.div_ceil(self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 0
    }

    pub fn has_next(&self) -> bool {
        self.page_number + 1 < self.total_pages()
    }

    /// Index of the first item on this page.
    pub fn start_index(&self) -> u64 {
        self.page_number * self.page_size
    }

    /// One past the index of the last item on this page.
    pub fn end_index(&self) -> u64 {
        (self.start_index() + self.page_size).min(self.total_items)
    }

    /// Number of items actually on this page.
    pub fn items_on_page(&self) -> u64 {
        self.end_index().saturating_sub(self.start_index())
    }

    /// Renders the identifier suffix, e.g. `p2-s15`.
    pub fn to_suffix(&self) -> String {
        format!("p{}-s{}", self.page_number, self.page_size)
    }

    /// Parses a suffix produced by [`PageState::to_suffix`].
    ///
    /// The suffix must match `p(\d+)-s(\d+)` exactly; anything else is
    /// `InvalidSuffix`. The item count is supplied by the caller since
    /// the suffix does not carry it.
    pub fn from_suffix(suffix: &str, total_items: u64) -> NavResult<Self> {
        let captures = suffix_pattern()
            .captures(suffix)
            .ok_or_else(|| NavError::InvalidSuffix(suffix.to_string()))?;
        let page: u64 = captures[1]
            .parse()
            .map_err(|_| NavError::InvalidSuffix(suffix.to_string()))?;
        let size: u64 = captures[2]
            .parse()
            .map_err(|_| NavError::InvalidSuffix(suffix.to_string()))?;
        if size < 1 {
            return Err(NavError::InvalidPageState(
                "page_size must be >= 1, got 0".to_string(),
            ));
        }
        Ok(Self {
            page_number: page,
            page_size: size,
            total_items,
        })
    }

    /// Returns a copy with the item count replaced.
    ///
    /// Identifiers carry page and size but not the item count, so a
    /// parsed state holds a placeholder total of zero until the caller
    /// refreshes it from the live content.
    pub fn with_total(&self, total_items: u64) -> Self {
        Self {
            total_items,
            ..*self
        }
    }

    /// Returns a copy pointing at a different page.
    pub fn at_page(&self, page_number: u64) -> Self {
        Self {
            page_number,
            ..*self
        }
    }

    /// Forces the page number into `[0, total_pages - 1]`, or 0 when
    /// there are no pages. Idempotent.
    pub fn clamp(&self) -> Self {
        let last = self.total_pages().saturating_sub(1);
        Self {
            page_number: self.page_number.min(last),
            ..*self
        }
    }
}
