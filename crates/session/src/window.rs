//! Windowed materialization of long page sequences.
//!
//! A chapter can run to hundreds of pages; only a bounded neighborhood
//! of the current page is worth having fetched and decoded at once.
//! Everything outside the window renders as a placeholder that
//! reserves layout space but issues no fetch.

use std::ops::RangeInclusive;

/// Pages kept materialized behind the cursor.
pub const WINDOW_BEFORE: u32 = 2;
/// Pages kept materialized ahead of the cursor.
pub const WINDOW_AFTER: u32 = 3;

/// The inclusive 1-based page range materialized for a cursor
/// position, clamped to the sequence bounds. Total of zero yields the
/// empty range.
pub fn materialized_range(
    cursor: u32,
    before: u32,
    after: u32,
    total: u32,
) -> RangeInclusive<u32> {
    if total == 0 {
        #[allow(clippy::reversed_empty_ranges)]
        return 1..=0;
    }
    let cursor = cursor.clamp(1, total);
    let lo = cursor.saturating_sub(before).max(1);
    let hi = cursor.saturating_add(after).min(total);
    lo..=hi
}

/// Current-page cursor over a fixed-length sequence.
///
/// The window recomputes on every cursor change with no hysteresis: a
/// page that exits the window stops being materialized immediately and
/// is refetched if it re-enters.
#[derive(Debug, Clone)]
pub struct PageWindow {
    cursor: u32,
    total: u32,
    before: u32,
    after: u32,
}

impl PageWindow {
    /// Window over `total` pages with the default neighborhood.
    pub fn new(total: u32) -> Self {
        Self::with_bounds(total, WINDOW_BEFORE, WINDOW_AFTER)
    }

    pub fn with_bounds(total: u32, before: u32, after: u32) -> Self {
        Self {
            cursor: 1,
            total,
            before,
            after,
        }
    }

    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Move the cursor to the page a visibility signal reported,
    /// clamped to the sequence bounds.
    pub fn advance_to(&mut self, page: u32) {
        self.cursor = if self.total == 0 {
            1
        } else {
            page.clamp(1, self.total)
        };
    }

    /// The sequence length changed (new chapter loaded).
    pub fn reset(&mut self, total: u32) {
        self.total = total;
        self.cursor = 1;
    }

    pub fn range(&self) -> RangeInclusive<u32> {
        materialized_range(self.cursor, self.before, self.after, self.total)
    }

    /// Whether the page should be fully rendered (network-fetched)
    /// rather than shown as a placeholder.
    pub fn is_materialized(&self, page: u32) -> bool {
        self.range().contains(&page)
    }
}
