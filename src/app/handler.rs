//! Event handling and state transition logic.
//!
//! This module implements the controller: every input (user intent, resize,
//! worker response) is an [`Event`], and [`handle_event`] applies it to
//! [`AppState`] and returns the side effects to perform.
//!
//! # Architecture
//!
//! 1. Events arrive from the key mapper, the terminal or the fetch worker
//! 2. [`handle_event`] pattern-matches the event exhaustively
//! 3. State mutations occur via `AppState` and `Grid` methods
//! 4. Actions are collected and returned for execution
//!
//! The returned flag says whether anything visible changed, so hosts can skip
//! redrawing.
//!
//! # Event Types
//!
//! - **Layout**: `Resize`
//! - **Navigation**: `MoveUp`, `MoveDown`, `MoveLeft`, `MoveRight`, `NextScreenPage`, `PrevScreenPage`
//! - **Filter**: `EnterFilterMode`, `FilterChar`, `FilterBackspace`, `ExitFilterMode`, `ClearFilter`
//! - **Remote paging**: `NextRemotePage`, `PrevRemotePage`, `Refresh`, `FetchCompleted`
//! - **Detail**: `OpenDetail`, `ViewValue`, `CloseDetail`, `DetailCompleted`
//! - **Session**: `SwitchContext`, `Quit`
//!
//! # Example
//!
//! ```rust
//! use secretgrid::app::{handle_event, AppState, Event};
//! use secretgrid::Config;
//!
//! let mut state = AppState::new(&Config::default());
//! let (_changed, actions) = handle_event(&mut state, &Event::Refresh)?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), secretgrid::domain::GridError>(())
//! ```

use super::modes::Screen;
use crate::app::{Action, AppState};
use crate::domain::{self, CredentialContext, RemotePage};
use crate::paging::RequestId;
use crate::worker::WorkerResponse;

/// Inputs to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The terminal was resized to `width` columns by `height` rows.
    Resize { width: usize, height: usize },

    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,

    /// Jump to the next screen page of the current remote page.
    NextScreenPage,
    /// Jump to the previous screen page of the current remote page.
    PrevScreenPage,

    /// Start editing the filter query. An existing query stays applied.
    EnterFilterMode,
    /// Append a character to the query. Ignored outside filter mode.
    FilterChar(char),
    /// Remove the last query character. Ignored outside filter mode.
    FilterBackspace,
    /// Stop editing, keeping the query applied.
    ExitFilterMode,
    /// Stop editing and clear the query.
    ClearFilter,

    /// Show the next remote page, fetching it if not cached.
    NextRemotePage,
    /// Show the previous cached remote page.
    PrevRemotePage,
    /// Discard all remote pages and reload page 0.
    Refresh,

    /// A list request finished.
    FetchCompleted {
        request: RequestId,
        result: Result<RemotePage, String>,
    },

    /// Open the detail screen for the selected item. Nothing is fetched.
    OpenDetail,
    /// Load the value of the item on the detail screen, unless already loaded.
    ViewValue,
    /// Return to the grid.
    CloseDetail,

    /// A detail lookup finished.
    DetailCompleted {
        id: String,
        result: Result<String, String>,
    },

    /// Replace the credential context and reload.
    SwitchContext(CredentialContext),

    Quit,
}

impl From<WorkerResponse> for Event {
    fn from(response: WorkerResponse) -> Self {
        match response {
            WorkerResponse::PageListed { request, page } => Self::FetchCompleted {
                request,
                result: Ok(page),
            },
            WorkerResponse::ListFailed { request, message } => Self::FetchCompleted {
                request,
                result: Err(message),
            },
            WorkerResponse::DetailLoaded { id, value } => Self::DetailCompleted { id, result: Ok(value) },
            WorkerResponse::DetailFailed { id, message } => Self::DetailCompleted {
                id,
                result: Err(message),
            },
        }
    }
}

impl Event {
    /// Events that act on the grid and are ignored on the detail screen.
    const fn is_grid_event(&self) -> bool {
        matches!(
            self,
            Self::MoveUp
                | Self::MoveDown
                | Self::MoveLeft
                | Self::MoveRight
                | Self::NextScreenPage
                | Self::PrevScreenPage
                | Self::EnterFilterMode
                | Self::FilterChar(_)
                | Self::FilterBackspace
                | Self::ExitFilterMode
                | Self::ClearFilter
                | Self::NextRemotePage
                | Self::PrevRemotePage
                | Self::Refresh
                | Self::OpenDetail
        )
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Parameters
///
/// * `state` - Mutable reference to application state
/// * `event` - Event to process
///
/// # Returns
///
/// Whether the view changed, and the actions to execute in order.
///
/// # Errors
///
/// Reserved for failures while applying an event; every current event is
/// handled infallibly.
pub fn handle_event(state: &mut AppState, event: &Event) -> domain::Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    if state.screen == Screen::Detail && event.is_grid_event() {
        tracing::trace!("grid event ignored on detail screen");
        return Ok((false, vec![]));
    }

    match event {
        Event::Resize { width, height } => {
            state.resize(*width, *height);
            Ok((true, vec![]))
        }
        Event::MoveUp => Ok((state.grid.move_up(), vec![])),
        Event::MoveDown => Ok((state.grid.move_down(), vec![])),
        Event::MoveLeft => Ok((state.grid.move_left(), vec![])),
        Event::MoveRight => Ok((state.grid.move_right(), vec![])),
        Event::NextScreenPage => Ok((state.grid.next_screen_page(), vec![])),
        Event::PrevScreenPage => Ok((state.grid.prev_screen_page(), vec![])),

        Event::EnterFilterMode => {
            state.grid.enter_filter_mode();
            Ok((true, vec![]))
        }
        Event::FilterChar(c) => {
            if !state.grid.is_filtering() {
                return Ok((false, vec![]));
            }
            state.grid.push_query_char(*c);
            tracing::trace!(query = %state.grid.filter_query(), char = %c, "filter query updated");
            Ok((true, vec![]))
        }
        Event::FilterBackspace => {
            if !state.grid.is_filtering() {
                return Ok((false, vec![]));
            }
            Ok((state.grid.pop_query_char(), vec![]))
        }
        Event::ExitFilterMode => {
            tracing::debug!(query = %state.grid.filter_query(), "filter mode exited");
            state.grid.exit_filter_mode();
            Ok((true, vec![]))
        }
        Event::ClearFilter => {
            state.grid.clear_filter();
            Ok((true, vec![]))
        }

        Event::NextRemotePage => {
            let before = state.pages.current_index();
            let actions: Vec<Action> = state
                .request_next_remote_page()
                .map(Action::PostToWorker)
                .into_iter()
                .collect();
            let changed = !actions.is_empty() || state.pages.current_index() != before;
            Ok((changed, actions))
        }
        Event::PrevRemotePage => Ok((state.prev_remote_page(), vec![])),
        Event::Refresh => {
            let message = state.request_refresh();
            Ok((true, vec![Action::PostToWorker(message)]))
        }
        Event::FetchCompleted { request, result } => Ok((state.apply_fetch_result(*request, result), vec![])),

        Event::OpenDetail => {
            if !state.open_detail() {
                tracing::debug!("no item selected");
                return Ok((false, vec![]));
            }
            Ok((true, vec![]))
        }
        Event::ViewValue => match state.request_detail_value() {
            Some(message) => Ok((true, vec![Action::PostToWorker(message)])),
            None => Ok((false, vec![])),
        },
        Event::CloseDetail => {
            if state.screen == Screen::Grid {
                return Ok((false, vec![]));
            }
            state.close_detail();
            Ok((true, vec![]))
        }
        Event::DetailCompleted { id, result } => Ok((state.apply_detail(id, result), vec![])),

        Event::SwitchContext(context) => {
            let message = state.switch_context(context.clone());
            Ok((true, vec![Action::PostToWorker(message)]))
        }
        Event::Quit => Ok((false, vec![Action::Quit])),
    }
}
