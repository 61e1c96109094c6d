//! secretgrid: a paginated grid engine for browsing remotely listed secrets.
//!
//! The crate holds everything between a terminal front end and a remote
//! listing API that returns items in pages with continuation tokens:
//! - Grid layout that fits as many fixed-height cells as the terminal allows
//! - Case-insensitive filtering of the current page, with optional fuzzy matching
//! - Cursor and screen-page navigation that never points past the filtered items
//! - A cache of already fetched remote pages for free back/forward movement
//! - Sequenced fetch requests on a background worker thread

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host (terminal loop, renderer)                     │  ← Not in this crate
//! └─────────────────────────────────────────────────────┘
//!            │ Key / Event            ↑ GridViewModel
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Key mapping and event handling                   │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Grid (grid/)  │   │ Paging        │   │ Worker        │
//! │ - Layout      │   │ (paging/)     │   │ (worker/)     │
//! │ - Filter      │   │ - Page cache  │   │ - Fetch thread│
//! │ - Navigation  │   │ - Sequencing  │   │ - Source API  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Source and Infrastructure                  │
//! │  - Item, RemotePage, errors (domain/)               │
//! │  - Source trait and fixture source (source/)        │
//! │  - Data/config paths (infrastructure/)              │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry spans to a JSON-lines file         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Controller with the event/action model
//! - [`domain`]: Core value types and errors
//! - [`grid`]: Layout, filter and navigation for one remote page
//! - [`paging`]: Remote page cache and request sequencing
//! - [`source`]: The listing API boundary
//! - [`worker`]: Background fetch worker
//! - [`ui`]: View model handed to the renderer
//! - [`infrastructure`]: Filesystem paths
//! - [`observability`]: Tracing setup
//!
//! # Configuration
//!
//! ```toml
//! # ~/.config/secretgrid/config.toml
//! profile = "prod"
//! region = "eu-west-1"
//! page_size = 50
//! match_mode = "fuzzy"
//! trace_level = "secretgrid=debug"
//!
//! [cell]
//! min_cell_width = 35
//! max_cell_width = 60
//! cell_height = 4
//! spacing = 2
//! ```
//!
//! # Example
//!
//! ```rust
//! use secretgrid::source::FixtureSource;
//! use secretgrid::worker::WorkerThread;
//! use secretgrid::{handle_event, initialize, Action, Config, Event, GridError, Item};
//! use std::time::Duration;
//!
//! let items = (0..12).map(|i| Item::new(format!("id-{i}"), format!("app/secret-{i}"))).collect();
//! let worker = WorkerThread::spawn(Box::new(FixtureSource::new(items)))?;
//!
//! let mut state = initialize(&Config::default());
//! handle_event(&mut state, &Event::Resize { width: 120, height: 40 })?;
//!
//! let (_, actions) = handle_event(&mut state, &Event::Refresh)?;
//! for action in actions {
//!     if let Action::PostToWorker(message) = action {
//!         worker.post(message)?;
//!     }
//! }
//!
//! let response = worker
//!     .recv_timeout(Duration::from_secs(5))?
//!     .ok_or_else(|| GridError::Worker("no response".to_string()))?;
//! handle_event(&mut state, &Event::from(response))?;
//! assert_eq!(state.grid.items().len(), 12);
//! # Ok::<(), secretgrid::GridError>(())
//! ```

pub mod app;
pub mod domain;
pub mod grid;
pub mod infrastructure;
pub mod paging;
pub mod source;
pub mod ui;
pub mod worker;

pub mod observability;

pub use app::{handle_event, map_key, Action, AppState, Event, Key, Screen};
pub use domain::{ContinuationToken, CredentialContext, GridError, Item, RemotePage, Result};
pub use grid::{CellConstraints, Grid, GridShape, MatchMode};
pub use ui::GridViewModel;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Default number of items requested per remote page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Default columns reserved around the grid (borders and padding).
pub const DEFAULT_CHROME_WIDTH: usize = 6;

/// Default rows reserved around the grid (header, filter bar, footer).
pub const DEFAULT_CHROME_HEIGHT: usize = 10;

/// Largest accepted cell width, in columns.
pub const MAX_CELL_WIDTH_LIMIT: usize = 1024;

/// Largest accepted cell height, in rows.
pub const MAX_CELL_HEIGHT_LIMIT: usize = 256;

/// Largest accepted gap between cells, in columns.
pub const MAX_SPACING_LIMIT: usize = 64;

/// Engine configuration.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Credential profile passed through to the source.
    pub profile: Option<String>,

    /// Region passed through to the source.
    pub region: Option<String>,

    /// Items requested per remote page. Default: 50
    pub page_size: usize,

    /// Cell sizing constraints for the grid layout.
    pub cell: CellConstraints,

    /// How filter queries match item names. Default: substring
    pub match_mode: MatchMode,

    /// Terminal columns not available to the grid.
    pub chrome_width: usize,

    /// Terminal rows not available to the grid.
    pub chrome_height: usize,

    /// `EnvFilter` directive for exported spans, e.g. `"debug"` or
    /// `"secretgrid=trace"`. Default: `RUST_LOG`, then `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: None,
            region: None,
            page_size: DEFAULT_PAGE_SIZE,
            cell: CellConstraints::default(),
            match_mode: MatchMode::default(),
            chrome_width: DEFAULT_CHROME_WIDTH,
            chrome_height: DEFAULT_CHROME_HEIGHT,
            trace_level: None,
        }
    }
}

impl Config {
    /// Builds a configuration from flat string key/value pairs.
    ///
    /// Parsing is lenient: missing, empty or unparseable values fall back to
    /// their defaults one key at a time. If the parsed cell constraints or
    /// page size fail [`Config::validate`], those fall back to their defaults
    /// as a group. Recognized keys: `profile`,
    /// `region`, `page_size`, `min_cell_width`, `max_cell_width`,
    /// `cell_height`, `cell_spacing`, `match_mode`, `chrome_width`,
    /// `chrome_height`, `trace_level`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use secretgrid::{Config, MatchMode};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("profile".to_string(), "prod".to_string());
    /// map.insert("page_size".to_string(), "25".to_string());
    /// map.insert("match_mode".to_string(), "Fuzzy".to_string());
    /// map.insert("cell_height".to_string(), "tall".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.profile.as_deref(), Some("prod"));
    /// assert_eq!(config.page_size, 25);
    /// assert_eq!(config.match_mode, MatchMode::Fuzzy);
    /// assert_eq!(config.cell.cell_height, 4);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            map.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let number = |key: &str, fallback: usize| {
            map.get(key)
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(fallback)
        };

        let mut config = Self {
            profile: text("profile"),
            region: text("region"),
            page_size: number("page_size", defaults.page_size),
            cell: CellConstraints {
                min_cell_width: number("min_cell_width", defaults.cell.min_cell_width),
                max_cell_width: number("max_cell_width", defaults.cell.max_cell_width),
                cell_height: number("cell_height", defaults.cell.cell_height),
                spacing: number("cell_spacing", defaults.cell.spacing),
            },
            match_mode: map
                .get("match_mode")
                .and_then(|v| MatchMode::from_name(v))
                .unwrap_or(defaults.match_mode),
            chrome_width: number("chrome_width", defaults.chrome_width),
            chrome_height: number("chrome_height", defaults.chrome_height),
            trace_level: text("trace_level"),
        };

        if let Err(e) = config.validate() {
            tracing::warn!(error = %e, "invalid cell or page settings, using defaults");
            config.cell = defaults.cell;
            config.page_size = defaults.page_size;
        }
        config
    }

    /// Reads and validates a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Io`] if the file cannot be read and
    /// [`GridError::Config`] if it does not parse or fails [`Config::validate`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)
            .map_err(|e| GridError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the default config file, or the defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_file`] when the file exists.
    pub fn load_default() -> Result<Self> {
        let path = infrastructure::get_config_path();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Checks the constraints the layout and paging code rely on.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Config`] naming the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        let cell = &self.cell;
        if cell.min_cell_width == 0 {
            return Err(GridError::Config("min_cell_width must be at least 1".to_string()));
        }
        if cell.min_cell_width > cell.max_cell_width {
            return Err(GridError::Config(format!(
                "min_cell_width ({}) exceeds max_cell_width ({})",
                cell.min_cell_width, cell.max_cell_width
            )));
        }
        if cell.max_cell_width > MAX_CELL_WIDTH_LIMIT {
            return Err(GridError::Config(format!(
                "max_cell_width ({}) exceeds {MAX_CELL_WIDTH_LIMIT}",
                cell.max_cell_width
            )));
        }
        if cell.cell_height == 0 || cell.cell_height > MAX_CELL_HEIGHT_LIMIT {
            return Err(GridError::Config(format!(
                "cell_height ({}) must be between 1 and {MAX_CELL_HEIGHT_LIMIT}",
                cell.cell_height
            )));
        }
        if cell.spacing > MAX_SPACING_LIMIT {
            return Err(GridError::Config(format!(
                "spacing ({}) exceeds {MAX_SPACING_LIMIT}",
                cell.spacing
            )));
        }
        if self.page_size == 0 {
            return Err(GridError::Config("page_size must be at least 1".to_string()));
        }
        Ok(())
    }

    #[must_use]
    pub fn credential_context(&self) -> CredentialContext {
        CredentialContext::new(self.profile.clone(), self.region.clone())
    }
}

/// Creates the initial application state.
///
/// The grid starts empty and the host issues [`Event::Refresh`] to load the
/// first remote page.
///
/// # Example
///
/// ```rust
/// use secretgrid::{initialize, Config};
///
/// let state = initialize(&Config::default());
/// assert!(state.grid.items().is_empty());
/// ```
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        context = %config.credential_context(),
        page_size = config.page_size,
        match_mode = ?config.match_mode,
        "initializing secretgrid"
    );
    AppState::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn from_map_falls_back_per_key() {
        let mut map = BTreeMap::new();
        map.insert("page_size".to_string(), "-3".to_string());
        map.insert("min_cell_width".to_string(), "20".to_string());
        map.insert("region".to_string(), "  ".to_string());
        map.insert("match_mode".to_string(), "regex".to_string());

        let config = Config::from_map(&map);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.cell.min_cell_width, 20);
        assert_eq!(config.region, None);
        assert_eq!(config.match_mode, MatchMode::Substring);
    }

    #[test]
    fn from_file_reads_partial_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "profile = \"staging\"\nmatch_mode = \"fuzzy\"\n\n[cell]\nmax_cell_width = 80"
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.profile.as_deref(), Some("staging"));
        assert_eq!(config.match_mode, MatchMode::Fuzzy);
        assert_eq!(config.cell.max_cell_width, 80);
        assert_eq!(config.cell.min_cell_width, 35);
        assert_eq!(config.page_size, 50);
    }

    #[test]
    fn from_file_rejects_inverted_widths() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[cell]\nmin_cell_width = 70\nmax_cell_width = 40").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, GridError::Config(_)));
    }

    #[test]
    fn from_file_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "page_size = \"many\"").unwrap();
        assert!(matches!(
            Config::from_file(file.path()),
            Err(GridError::Config(_))
        ));
    }

    #[test]
    fn from_map_replaces_out_of_range_cells_with_defaults() {
        let mut map = BTreeMap::new();
        map.insert("cell_spacing".to_string(), usize::MAX.to_string());
        map.insert("cell_height".to_string(), usize::MAX.to_string());
        map.insert("profile".to_string(), "prod".to_string());

        let config = Config::from_map(&map);
        assert_eq!(config.cell, CellConstraints::default());
        assert_eq!(config.profile.as_deref(), Some("prod"));
        assert!(config.validate().is_ok());

        let mut state = initialize(&config);
        state.resize(120, 40);
        assert!(state.grid.shape().capacity() >= 1);
    }

    #[test]
    fn validate_bounds_spacing_and_height() {
        let mut config = Config::default();
        config.cell.spacing = MAX_SPACING_LIMIT + 1;
        assert!(matches!(config.validate(), Err(GridError::Config(_))));

        let mut config = Config::default();
        config.cell.cell_height = MAX_CELL_HEIGHT_LIMIT + 1;
        assert!(matches!(config.validate(), Err(GridError::Config(_))));
    }

    #[test]
    fn from_file_rejects_huge_spacing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[cell]\nspacing = 9223372036854775807").unwrap();
        assert!(matches!(
            Config::from_file(file.path()),
            Err(GridError::Config(_))
        ));
    }

    #[test]
    fn validate_rejects_zero_page_size() {
        let config = Config {
            page_size: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn credential_context_passes_through() {
        let config = Config {
            profile: Some("prod".to_string()),
            ..Config::default()
        };
        assert_eq!(config.credential_context().to_string(), "prod@default");
    }
}
