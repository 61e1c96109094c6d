//! View model types representing renderable UI state.
//!
//! View models are computed from [`AppState`](crate::app::AppState) via
//! `compute_viewmodel()` and handed to whatever renders the terminal. They say
//! which items are visible, in what order and which one is selected; they never
//! say how anything looks.
//!
//! # Example
//!
//! ```rust
//! use secretgrid::app::AppState;
//! use secretgrid::Config;
//!
//! let state = AppState::new(&Config::default());
//! let vm = state.compute_viewmodel();
//! assert!(vm.rows.is_empty());
//! assert_eq!(vm.page_indicator, (1, 1));
//! ```

use serde::Serialize;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridViewModel {
    /// Visible cells of the current screen page, row by row.
    ///
    /// The last row may be shorter than the others.
    pub rows: Vec<Vec<DisplayCell>>,

    /// Width of each cell in terminal columns.
    pub cell_width: usize,

    /// One-based screen page and total screen pages.
    pub page_indicator: (usize, usize),

    pub remote: RemotePageInfo,

    pub header: HeaderInfo,

    pub footer: FooterInfo,

    /// Present while editing a query or while a query is applied.
    pub filter_bar: Option<FilterBarInfo>,

    /// Present when the current screen page shows nothing.
    pub empty_state: Option<EmptyState>,

    /// Last error, cleared by the next successful load.
    pub error: Option<String>,

    /// Present on the detail screen.
    pub detail: Option<DetailInfo>,
}

impl GridViewModel {
    /// The selected cell, if the cursor is on an item.
    #[must_use]
    pub fn selected(&self) -> Option<&DisplayCell> {
        self.rows.iter().flatten().find(|cell| cell.is_selected)
    }
}

/// Display information for one grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayCell {
    pub name: String,

    /// Short last-changed date, "Unknown" if the source gave none.
    pub last_changed: String,

    pub is_selected: bool,

    /// Character ranges of `name` matched by the query.
    ///
    /// Each tuple is `(start_index, end_index)` in UTF-8 character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Position within the remote page sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RemotePageInfo {
    /// One-based index of the current remote page.
    pub page_number: usize,

    /// Remote pages fetched since the last refresh.
    pub cached_pages: usize,

    pub has_next: bool,
    pub has_prev: bool,

    /// A fetch is in flight.
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderInfo {
    pub title: String,

    /// Credential context line, e.g. "Profile: dev | Region: eu-west-1".
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterInfo {
    /// Keybinding help text for the current screen and mode.
    pub keybindings: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterBarInfo {
    pub query: String,

    /// Keystrokes currently edit the query.
    pub editing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// The item open on the detail screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailInfo {
    pub name: String,
    pub id: String,
    pub description: Option<String>,
    pub last_changed: String,
    pub tags: Vec<(String, String)>,

    /// The detail value once loaded.
    pub value: Option<String>,

    pub loading: bool,
}
