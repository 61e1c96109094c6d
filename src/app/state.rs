//! Application state and view model computation.
//!
//! [`AppState`] is the single, serializable state value owned by the
//! controller thread. Every mutation happens here, in response to an event,
//! and nothing else holds a reference to it.
//!
//! # State Components
//!
//! - **Grid**: Items of the active remote page, filter query, layout and cursor
//! - **Pages**: Remote pages fetched since the last refresh
//! - **Requests**: Sequence ids and the single in-flight fetch slot
//! - **Screen**: Grid or detail view
//! - **Context**: Credential context forwarded to every fetch
//!
//! # Fetch Lifecycle
//!
//! Fetches are never performed here. Methods that need remote data return a
//! [`WorkerMessage`] for the handler to emit, and the worker's answer comes
//! back through [`AppState::apply_fetch_result`], which drops answers to
//! superseded requests.
//!
//! # Example
//!
//! ```rust
//! use secretgrid::app::AppState;
//! use secretgrid::Config;
//!
//! let mut state = AppState::new(&Config::default());
//! state.resize(86, 30);
//! let request = state.request_refresh();
//! assert!(state.requests.is_loading());
//! ```

use super::modes::Screen;
use crate::domain::{CredentialContext, Item, RemotePage};
use crate::grid::Grid;
use crate::paging::{FetchKind, NextStep, RemotePageCache, RequestId, RequestTracker};
use crate::ui::viewmodel::{
    DetailInfo, DisplayCell, EmptyState, FilterBarInfo, FooterInfo, GridViewModel, HeaderInfo,
    RemotePageInfo,
};
use crate::worker::WorkerMessage;
use crate::Config;
use serde::{Deserialize, Serialize};

const TITLE: &str = "Secret Grid";

/// The item open on the detail screen and its value, once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailView {
    pub item: Item,
    pub value: Option<String>,
    pub loading: bool,
}

/// Central application state container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    /// Layout, filter and cursor over the current remote page's items.
    pub grid: Grid,

    /// Remote pages fetched since the last refresh.
    pub pages: RemotePageCache,

    /// Request sequencing and the in-flight fetch slot.
    pub requests: RequestTracker,

    /// Credential context passed through to the source.
    pub context: CredentialContext,

    /// Page size hint for list requests.
    pub page_size: usize,

    pub screen: Screen,

    /// Set while the detail screen is open.
    pub detail: Option<DetailView>,

    /// User-visible error, cleared by the next successful load.
    pub error_message: Option<String>,

    /// Terminal columns and rows reserved around the grid.
    pub chrome: (usize, usize),

    /// Last terminal size reported by a resize.
    pub terminal: (usize, usize),
}

impl AppState {
    /// Creates an empty state from configuration.
    ///
    /// Nothing is loaded until [`request_refresh`](Self::request_refresh) runs.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            grid: Grid::new(config.cell, config.match_mode),
            pages: RemotePageCache::new(),
            requests: RequestTracker::new(),
            context: config.credential_context(),
            page_size: config.page_size.max(1),
            screen: Screen::Grid,
            detail: None,
            error_message: None,
            chrome: (config.chrome_width, config.chrome_height),
            terminal: (0, 0),
        }
    }

    /// Applies a terminal resize, reserving the chrome area around the grid.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.terminal = (width, height);
        self.grid.resize(
            width.saturating_sub(self.chrome.0),
            height.saturating_sub(self.chrome.1),
        );
    }

    /// Starts a reload of page 0, superseding any in-flight request.
    ///
    /// The page cache and the grid's items are cleared immediately.
    pub fn request_refresh(&mut self) -> WorkerMessage {
        let request = self.requests.supersede(FetchKind::Refresh);
        self.pages.clear();
        self.grid.clear_items();

        tracing::debug!(%request, context = %self.context, "refresh requested");
        WorkerMessage::list_page(request, self.context.clone(), None, self.page_size)
    }

    /// Moves to the next remote page.
    ///
    /// A cached page is shown at once and `None` is returned. Otherwise a
    /// fetch is started and its message returned, unless the source is
    /// exhausted or another request is in flight.
    pub fn request_next_remote_page(&mut self) -> Option<WorkerMessage> {
        match self.pages.next_step() {
            NextStep::Cached => {
                self.pages.step_forward();
                tracing::debug!(index = self.pages.current_index(), "next remote page served from cache");
                self.show_current_page();
                None
            }
            NextStep::Fetch(token) => {
                let request = self.requests.try_begin(FetchKind::Advance {
                    from_index: self.pages.current_index(),
                })?;
                tracing::debug!(%request, %token, "next remote page requested");
                Some(WorkerMessage::list_page(
                    request,
                    self.context.clone(),
                    Some(token),
                    self.page_size,
                ))
            }
            NextStep::Exhausted => {
                tracing::debug!("no further remote pages");
                None
            }
        }
    }

    /// Moves to the previous cached remote page. Returns `false` on page 0.
    pub fn prev_remote_page(&mut self) -> bool {
        if !self.pages.has_prev() {
            return false;
        }
        self.pages.retreat();
        tracing::debug!(index = self.pages.current_index(), "previous remote page shown");
        self.show_current_page();
        true
    }

    /// Loads the current remote page's items into the grid.
    ///
    /// The filter query is re-applied and navigation returns to origin.
    pub fn show_current_page(&mut self) {
        let items = self
            .pages
            .current_page()
            .map(|page| page.items.clone())
            .unwrap_or_default();
        self.grid.set_items(items);
    }

    /// Applies a list response.
    ///
    /// Returns `false` if the response belongs to a superseded request and
    /// was discarded.
    pub fn apply_fetch_result(&mut self, request: RequestId, result: &Result<RemotePage, String>) -> bool {
        let Some(kind) = self.requests.complete(request) else {
            return false;
        };

        match result {
            Err(message) => {
                tracing::error!(%request, ?kind, error = %message, "fetch failed");
                self.error_message = Some(format!("Failed to load items: {message}"));
            }
            Ok(page) => {
                match kind {
                    FetchKind::Refresh => {
                        self.pages.install_first(page.clone());
                        self.show_current_page();
                    }
                    FetchKind::Advance { from_index } => {
                        self.pages.push_fetched(page.clone());
                        if self.pages.current_index() == from_index {
                            self.pages.step_forward();
                            self.show_current_page();
                        } else {
                            tracing::debug!(
                                from_index,
                                current = self.pages.current_index(),
                                "user moved away, page cached without switching"
                            );
                        }
                    }
                }
                self.error_message = None;
            }
        }
        true
    }

    /// Opens the detail screen for the selected item without loading its value.
    ///
    /// Returns `false` if nothing is selected.
    pub fn open_detail(&mut self) -> bool {
        let Some(item) = self.grid.selected().cloned() else {
            return false;
        };
        tracing::debug!(id = %item.id, name = %item.name, "detail opened");

        self.screen = Screen::Detail;
        self.detail = Some(DetailView {
            item,
            value: None,
            loading: false,
        });
        true
    }

    /// Requests the value of the item on the detail screen.
    ///
    /// Returns `None` if no detail is open, the value is already loaded, or a
    /// lookup is pending.
    pub fn request_detail_value(&mut self) -> Option<WorkerMessage> {
        let detail = self
            .detail
            .as_mut()
            .filter(|detail| self.screen == Screen::Detail && detail.value.is_none() && !detail.loading)?;
        detail.loading = true;
        tracing::debug!(id = %detail.item.id, "detail value requested");
        Some(WorkerMessage::item_detail(detail.item.id.clone(), self.context.clone()))
    }

    /// Returns to the grid and drops any loaded detail value.
    pub fn close_detail(&mut self) {
        self.screen = Screen::Grid;
        self.detail = None;
    }

    /// Applies a detail response. Ignored unless that item is still open.
    pub fn apply_detail(&mut self, id: &str, result: &Result<String, String>) -> bool {
        let Some(detail) = self.detail.as_mut().filter(|detail| detail.item.id == id) else {
            tracing::debug!(id, "detail response for closed item discarded");
            return false;
        };

        detail.loading = false;
        match result {
            Ok(value) => {
                detail.value = Some(value.clone());
                self.error_message = None;
            }
            Err(message) => {
                tracing::error!(id, error = %message, "detail lookup failed");
                self.error_message = Some(format!("Failed to load value: {message}"));
            }
        }
        true
    }

    /// Replaces the credential context and reloads page 0.
    pub fn switch_context(&mut self, context: CredentialContext) -> WorkerMessage {
        tracing::debug!(from = %self.context, to = %context, "credential context switched");
        self.context = context;
        self.close_detail();
        self.request_refresh()
    }

    /// Computes the view model for the current state.
    #[must_use]
    pub fn compute_viewmodel(&self) -> GridViewModel {
        let query = self.grid.filter_query();
        let mode = self.grid.match_mode();
        let shape = self.grid.shape();
        let selected = self
            .grid
            .selected()
            .map(|_| self.grid.navigation().flat_index(shape));

        let rows: Vec<Vec<DisplayCell>> = self
            .grid
            .visible_items()
            .chunks(shape.columns)
            .enumerate()
            .map(|(row_index, row)| {
                row.iter()
                    .enumerate()
                    .map(|(col_index, item)| DisplayCell {
                        name: item.name.clone(),
                        last_changed: item.last_changed_label(),
                        is_selected: selected == Some(row_index * shape.columns + col_index),
                        highlight_ranges: crate::grid::filter::highlight_ranges(&item.name, query, mode),
                    })
                    .collect()
            })
            .collect();

        let empty_state = rows.is_empty().then(|| self.compute_empty_state());

        GridViewModel {
            rows,
            cell_width: shape.cell_width,
            page_indicator: self.grid.page_indicator(),
            remote: self.compute_remote_info(),
            header: self.compute_header(),
            footer: self.compute_footer(),
            filter_bar: self.compute_filter_bar(),
            empty_state,
            error: self.error_message.clone(),
            detail: self.compute_detail(),
        }
    }

    fn compute_remote_info(&self) -> RemotePageInfo {
        RemotePageInfo {
            page_number: self.pages.current_index() + 1,
            cached_pages: self.pages.len(),
            has_next: self.pages.has_next(),
            has_prev: self.pages.has_prev(),
            loading: self.requests.is_loading(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        HeaderInfo {
            title: TITLE.to_string(),
            context: format!(
                "Profile: {} | Region: {}",
                self.context.profile.as_deref().unwrap_or("default"),
                self.context.region.as_deref().unwrap_or("default")
            ),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.screen {
            Screen::Detail => "v: view value | esc: back | ctrl+c: quit".to_string(),
            Screen::Grid if self.grid.is_filtering() => {
                "type to filter | enter: apply | esc: clear | backspace: delete".to_string()
            }
            Screen::Grid => {
                let mut help = "hjkl/arrows: move | space/pgup: screen | /: filter | enter: view | r: refresh".to_string();
                if self.pages.has_prev() {
                    help.push_str(" | b: prev page");
                }
                if self.pages.has_next() {
                    help.push_str(" | n: next page");
                }
                help.push_str(" | q: quit");
                help
            }
        };
        FooterInfo { keybindings }
    }

    fn compute_filter_bar(&self) -> Option<FilterBarInfo> {
        let query = self.grid.filter_query();
        (self.grid.is_filtering() || !query.is_empty()).then(|| FilterBarInfo {
            query: query.to_string(),
            editing: self.grid.is_filtering(),
        })
    }

    fn compute_empty_state(&self) -> EmptyState {
        if self.requests.is_loading() {
            return EmptyState {
                message: "Loading...".to_string(),
                subtitle: String::new(),
            };
        }

        let query = self.grid.filter_query();
        if query.is_empty() {
            EmptyState {
                message: "No items found".to_string(),
                subtitle: "Try refreshing with 'r'".to_string(),
            }
        } else {
            EmptyState {
                message: format!("No items match '{query}'"),
                subtitle: "Press esc to clear the filter".to_string(),
            }
        }
    }

    fn compute_detail(&self) -> Option<DetailInfo> {
        let detail = self.detail.as_ref().filter(|_| self.screen == Screen::Detail)?;
        let item = &detail.item;
        Some(DetailInfo {
            name: item.name.clone(),
            id: item.id.clone(),
            description: item.description.clone(),
            last_changed: item.last_changed_label(),
            tags: item.tags.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            value: detail.value.clone(),
            loading: detail.loading,
        })
    }
}
