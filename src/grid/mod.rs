//! Grid view over one remote page: layout, filtering and navigation.
//!
//! [`Grid`] owns the items of the active remote page, the current filter
//! query, the computed [`GridShape`] and the [`NavigationState`]. It keeps the
//! three consistent:
//!
//! - a new item set or query re-filters from the unfiltered items and resets
//!   navigation to origin
//! - a resize recomputes the shape and re-validates navigation, keeping the
//!   screen page when it still exists
//! - movement only ever touches navigation
//!
//! # Modules
//!
//! - [`layout`]: Viewport → grid shape
//! - [`filter`]: Items + query → filtered items
//! - [`navigation`]: Cursor and screen-page state machine
//!
//! # Example
//!
//! ```rust
//! use secretgrid::domain::Item;
//! use secretgrid::grid::{Grid, CellConstraints, MatchMode};
//!
//! let mut grid = Grid::new(CellConstraints::default(), MatchMode::Substring);
//! grid.resize(80, 20);
//! grid.set_items((0..12).map(|i| Item::new(i.to_string(), format!("secret-{i}"))).collect());
//!
//! assert_eq!(grid.page_indicator(), (1, 2));
//! assert_eq!(grid.selected().map(|item| item.name.as_str()), Some("secret-0"));
//! ```

pub mod filter;
pub mod layout;
pub mod navigation;

pub use filter::MatchMode;
pub use layout::{CellConstraints, GridShape};
pub use navigation::NavigationState;

use crate::domain::Item;
use serde::{Deserialize, Serialize};

/// Layout, filter and cursor state for the items of one remote page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    /// Unfiltered items of the active remote page, in source order.
    items: Vec<Item>,

    /// Subsequence of `items` matching `query`.
    filtered: Vec<Item>,

    query: String,

    /// Whether keystrokes currently edit the query.
    filtering: bool,

    match_mode: MatchMode,
    constraints: CellConstraints,

    /// Last viewport given to `resize`, in cells.
    viewport: (usize, usize),

    shape: GridShape,
    navigation: NavigationState,
}

impl Grid {
    /// Creates an empty grid laid out for a zero-sized viewport.
    #[must_use]
    pub fn new(constraints: CellConstraints, match_mode: MatchMode) -> Self {
        let shape = layout::compute(0, 0, &constraints);
        Self {
            items: vec![],
            filtered: vec![],
            query: String::new(),
            filtering: false,
            match_mode,
            constraints,
            viewport: (0, 0),
            shape,
            navigation: NavigationState::new(),
        }
    }

    /// Replaces the item set with a new remote page's items.
    ///
    /// The current query is re-applied and navigation returns to origin.
    pub fn set_items(&mut self, items: Vec<Item>) {
        tracing::debug!(item_count = items.len(), query = %self.query, "grid items replaced");
        self.items = items;
        self.refilter();
    }

    /// Removes all items, leaving the query untouched.
    pub fn clear_items(&mut self) {
        self.set_items(vec![]);
    }

    /// Recomputes the grid shape for a new viewport.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.viewport = (width, height);
        self.relayout();
    }

    /// Replaces the cell constraints and recomputes the shape.
    pub fn set_constraints(&mut self, constraints: CellConstraints) {
        self.constraints = constraints;
        self.relayout();
    }

    fn relayout(&mut self) {
        let (width, height) = self.viewport;
        let shape = layout::compute(width, height, &self.constraints);
        if shape != self.shape {
            tracing::debug!(
                columns = shape.columns,
                rows = shape.rows,
                cell_width = shape.cell_width,
                "grid shape changed"
            );
        }
        self.shape = shape;
        self.navigation.reshape(&self.shape, self.filtered.len());
    }

    /// Enters filter mode. The existing query stays applied.
    pub fn enter_filter_mode(&mut self) {
        self.filtering = true;
    }

    /// Leaves filter mode, keeping the query applied.
    pub fn exit_filter_mode(&mut self) {
        self.filtering = false;
    }

    /// Leaves filter mode and clears the query.
    pub fn clear_filter(&mut self) {
        self.filtering = false;
        self.set_query(String::new());
    }

    /// Appends a character to the query.
    pub fn push_query_char(&mut self, c: char) {
        let mut query = std::mem::take(&mut self.query);
        query.push(c);
        self.set_query(query);
    }

    /// Removes the last character of the query. Returns `false` if it was empty.
    pub fn pop_query_char(&mut self) -> bool {
        let mut query = std::mem::take(&mut self.query);
        let popped = query.pop().is_some();
        self.set_query(query);
        popped
    }

    /// Replaces the query, re-filters and resets navigation.
    pub fn set_query(&mut self, query: String) {
        self.query = query;
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = filter::apply(&self.items, &self.query, self.match_mode);
        self.navigation.reset(&self.shape, self.filtered.len());
    }

    pub fn move_up(&mut self) -> bool {
        self.navigation.move_up(&self.shape, self.filtered.len())
    }

    pub fn move_down(&mut self) -> bool {
        self.navigation.move_down(&self.shape, self.filtered.len())
    }

    pub fn move_left(&mut self) -> bool {
        self.navigation.move_left()
    }

    pub fn move_right(&mut self) -> bool {
        self.navigation.move_right(&self.shape, self.filtered.len())
    }

    pub fn next_screen_page(&mut self) -> bool {
        self.navigation.next_screen_page()
    }

    pub fn prev_screen_page(&mut self) -> bool {
        self.navigation.prev_screen_page()
    }

    /// Items on the current screen page, in display order.
    #[must_use]
    pub fn visible_items(&self) -> &[Item] {
        let range = self.navigation.visible_range(&self.shape, self.filtered.len());
        &self.filtered[range]
    }

    /// The item under the cursor, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Item> {
        self.navigation
            .selected_index(&self.shape, self.filtered.len())
            .and_then(|index| self.filtered.get(index))
    }

    /// One-based current screen page and total screen pages.
    #[must_use]
    pub const fn page_indicator(&self) -> (usize, usize) {
        (
            self.navigation.screen_page + 1,
            self.navigation.total_screen_pages,
        )
    }

    #[must_use]
    pub const fn is_filtering(&self) -> bool {
        self.filtering
    }

    #[must_use]
    pub fn filter_query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    #[must_use]
    pub const fn shape(&self) -> &GridShape {
        &self.shape
    }

    #[must_use]
    pub const fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    /// Unfiltered items of the active remote page.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn filtered_items(&self) -> &[Item] {
        &self.filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(count: usize) -> Vec<Item> {
        (0..count)
            .map(|i| Item::new(format!("id-{i}"), format!("item-{i:02}")))
            .collect()
    }

    /// 3 columns x 2 rows: (3 * 10 + 2 * 0) wide, 2 * (4 + 1) high.
    fn three_by_two() -> Grid {
        let constraints = CellConstraints {
            min_cell_width: 10,
            max_cell_width: 10,
            cell_height: 4,
            spacing: 0,
        };
        let mut grid = Grid::new(constraints, MatchMode::Substring);
        grid.resize(30, 10);
        grid
    }

    #[test]
    fn twelve_items_at_capacity_six_make_two_screen_pages() {
        let mut grid = three_by_two();
        grid.set_items(numbered(12));
        assert_eq!(grid.shape().capacity(), 6);
        assert_eq!(grid.page_indicator(), (1, 2));

        grid.next_screen_page();
        assert_eq!(grid.selected().map(|i| i.id.as_str()), Some("id-6"));
        assert_eq!(grid.visible_items().len(), 6);
    }

    #[test]
    fn query_change_resets_navigation() {
        let mut grid = three_by_two();
        grid.set_items(numbered(12));
        grid.next_screen_page();
        grid.move_right();

        grid.enter_filter_mode();
        grid.push_query_char('1');
        assert_eq!(grid.navigation(), &NavigationState::new());
        // item-01, item-10, item-11
        assert_eq!(grid.filtered_items().len(), 3);

        assert!(grid.pop_query_char());
        assert_eq!(grid.filtered_items().len(), 12);
        assert!(!grid.pop_query_char());
    }

    #[test]
    fn filter_always_starts_from_unfiltered_items() {
        let mut grid = three_by_two();
        grid.set_items(numbered(12));
        grid.set_query("item-1".to_string());
        assert_eq!(grid.filtered_items().len(), 2);
        grid.set_query(String::new());
        assert_eq!(grid.filtered_items(), grid.items());
    }

    #[test]
    fn new_items_keep_query_applied() {
        let mut grid = three_by_two();
        grid.set_query("-0".to_string());
        grid.set_items(numbered(12));
        assert_eq!(grid.filtered_items().len(), 10);
    }

    #[test]
    fn clear_filter_leaves_filter_mode() {
        let mut grid = three_by_two();
        grid.set_items(numbered(4));
        grid.enter_filter_mode();
        grid.push_query_char('3');
        assert!(grid.is_filtering());
        grid.clear_filter();
        assert!(!grid.is_filtering());
        assert_eq!(grid.filter_query(), "");
        assert_eq!(grid.filtered_items().len(), 4);
    }

    #[test]
    fn resize_keeps_screen_page_when_still_valid() {
        let mut grid = three_by_two();
        grid.set_items(numbered(30));
        grid.next_screen_page();
        grid.next_screen_page();
        assert_eq!(grid.page_indicator(), (3, 5));

        // Two rows of one column: capacity 2, fifteen pages.
        grid.resize(10, 10);
        assert_eq!(grid.page_indicator(), (3, 15));
    }

    #[test]
    fn empty_grid_is_navigable() {
        let mut grid = three_by_two();
        assert!(grid.visible_items().is_empty());
        assert!(grid.selected().is_none());
        assert!(!grid.move_down());
        assert_eq!(grid.page_indicator(), (1, 1));
    }
}
