//! Cursor and screen-page state machine.
//!
//! [`NavigationState`] tracks a `(row, column)` cursor inside one screen page
//! and which screen page of the filtered items is showing. It holds no items
//! itself: every operation takes the current [`GridShape`] and the filtered
//! item count, so the same state can be re-validated after a resize or a new
//! filter without copying data.
//!
//! # Screen Pages
//!
//! The filtered items are split into windows of `shape.capacity()` items:
//!
//! ```text
//! capacity 6, 14 items  →  [0..6) [6..12) [12..14)
//!                          page 0  page 1  page 2 (ragged)
//! ```
//!
//! # Page Boundaries
//!
//! Moving down past the last row (or onto an empty cell of a ragged row)
//! advances to the next screen page at row 0 with the column unchanged. If the
//! destination page is too short for that column, [`NavigationState::selected_index`]
//! returns `None` until the user moves left or up into bounds; the column is
//! never silently relocated. Moving up past row 0 retreats a page and lands on
//! the last row holding an item in the current column.

use super::layout::GridShape;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Number of screen pages needed for `item_count` items, never less than 1.
///
/// # Examples
///
/// ```
/// use secretgrid::grid::navigation::total_screen_pages;
///
/// assert_eq!(total_screen_pages(12, 6), 2);
/// assert_eq!(total_screen_pages(13, 6), 3);
/// assert_eq!(total_screen_pages(0, 6), 1);
/// ```
#[must_use]
pub fn total_screen_pages(item_count: usize, capacity: usize) -> usize {
    if capacity == 0 || item_count == 0 {
        1
    } else {
        item_count.div_ceil(capacity)
    }
}

/// Cursor position and screen page within the filtered items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    pub cursor_row: usize,
    pub cursor_col: usize,
    pub screen_page: usize,
    pub total_screen_pages: usize,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationState {
    /// Creates the initial state: cursor at origin on page 0 of 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cursor_row: 0,
            cursor_col: 0,
            screen_page: 0,
            total_screen_pages: 1,
        }
    }

    /// Returns to `(0, 0)` on page 0 and recomputes the page count.
    ///
    /// Called whenever the filtered item set is replaced.
    pub fn reset(&mut self, shape: &GridShape, item_count: usize) {
        *self = Self {
            total_screen_pages: total_screen_pages(item_count, shape.capacity()),
            ..Self::new()
        };
    }

    /// Re-validates the state after the grid shape changed.
    ///
    /// The screen page is kept if it still exists and clamped to the last page
    /// otherwise. The cursor is reset to `(0, 0)` only if it no longer points
    /// at an item.
    pub fn reshape(&mut self, shape: &GridShape, item_count: usize) {
        self.total_screen_pages = total_screen_pages(item_count, shape.capacity());
        if self.screen_page >= self.total_screen_pages {
            self.screen_page = self.total_screen_pages - 1;
        }
        self.validate_cursor(shape, item_count);
    }

    /// Flat index of the cursor within the current screen page.
    #[must_use]
    pub const fn flat_index(&self, shape: &GridShape) -> usize {
        self.cursor_row * shape.columns + self.cursor_col
    }

    /// Range of filtered-item indices shown on the current screen page.
    ///
    /// Empty when the page starts past the end of the items.
    #[must_use]
    pub fn visible_range(&self, shape: &GridShape, item_count: usize) -> Range<usize> {
        let capacity = shape.capacity();
        let start = self.screen_page.saturating_mul(capacity);
        if start >= item_count {
            return item_count..item_count;
        }
        start..(start + capacity).min(item_count)
    }

    /// Index into the filtered items of the selected item, if the cursor is on one.
    #[must_use]
    pub fn selected_index(&self, shape: &GridShape, item_count: usize) -> Option<usize> {
        if self.cursor_col >= shape.columns || self.cursor_row >= shape.rows {
            return None;
        }
        let range = self.visible_range(shape, item_count);
        let flat = self.flat_index(shape);
        (flat < range.len()).then(|| range.start + flat)
    }

    fn visible_len(&self, shape: &GridShape, item_count: usize) -> usize {
        self.visible_range(shape, item_count).len()
    }

    fn validate_cursor(&mut self, shape: &GridShape, item_count: usize) {
        if self.selected_index(shape, item_count).is_none() {
            self.cursor_row = 0;
            self.cursor_col = 0;
        }
    }

    /// Moves down a row, or to the next screen page from the bottom.
    ///
    /// Returns `true` if the state changed.
    pub fn move_down(&mut self, shape: &GridShape, item_count: usize) -> bool {
        let next_row = self.cursor_row + 1;
        if next_row < shape.rows
            && next_row * shape.columns + self.cursor_col < self.visible_len(shape, item_count)
        {
            self.cursor_row = next_row;
            return true;
        }

        if self.screen_page + 1 < self.total_screen_pages {
            self.screen_page += 1;
            self.cursor_row = 0;
            return true;
        }

        false
    }

    /// Moves up a row, or to the bottom of the previous screen page from row 0.
    ///
    /// Returns `true` if the state changed.
    pub fn move_up(&mut self, shape: &GridShape, item_count: usize) -> bool {
        if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.validate_cursor(shape, item_count);
            return true;
        }

        if self.screen_page > 0 {
            self.screen_page -= 1;
            self.cursor_row = shape.rows - 1;
            let visible = self.visible_len(shape, item_count);
            while self.cursor_row > 0 && self.flat_index(shape) >= visible {
                self.cursor_row -= 1;
            }
            self.validate_cursor(shape, item_count);
            return true;
        }

        false
    }

    /// Moves one column left. Never wraps to another row or page.
    pub fn move_left(&mut self) -> bool {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
            return true;
        }
        false
    }

    /// Moves one column right if that cell holds an item.
    pub fn move_right(&mut self, shape: &GridShape, item_count: usize) -> bool {
        let next_col = self.cursor_col + 1;
        if next_col < shape.columns
            && self.cursor_row * shape.columns + next_col < self.visible_len(shape, item_count)
        {
            self.cursor_col = next_col;
            return true;
        }
        false
    }

    /// Jumps to the next screen page with the cursor at origin.
    pub fn next_screen_page(&mut self) -> bool {
        if self.screen_page + 1 < self.total_screen_pages {
            self.screen_page += 1;
            self.cursor_row = 0;
            self.cursor_col = 0;
            return true;
        }
        false
    }

    /// Jumps to the previous screen page with the cursor at origin.
    pub fn prev_screen_page(&mut self) -> bool {
        if self.screen_page > 0 {
            self.screen_page -= 1;
            self.cursor_row = 0;
            self.cursor_col = 0;
            return true;
        }
        false
    }
}
