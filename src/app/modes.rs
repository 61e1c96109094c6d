//! Screen state for the application.
//!
//! The application shows one of two screens:
//! - **Grid**: Item grid with navigation, filtering and remote paging
//! - **Detail**: One item's metadata and detail value
//!
//! Filter mode is not a screen; it lives on the grid itself
//! (see [`Grid::is_filtering`](crate::grid::Grid::is_filtering)).

use serde::{Deserialize, Serialize};

/// Which screen currently receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Screen {
    /// Item grid.
    ///
    /// Accepts movement, screen-page, remote-page, filter and refresh events.
    #[default]
    Grid,

    /// Detail view of the item that was selected when it opened.
    ///
    /// Grid events are ignored until it closes.
    Detail,
}
