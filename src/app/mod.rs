//! Application layer coordinating state, events, and actions.
//!
//! This module is the controller that sits between the host (terminal loop,
//! fetch worker) and the grid and paging layers.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Keys → map_key → Events → handle_event → State Mutations → Actions → Side Effects
//!                              ↑                                         ↓
//!                              └──────────── Worker Responses ───────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event type and processing logic
//! - [`keys`]: Key bindings
//! - [`modes`]: Screen state
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use secretgrid::app::{handle_event, AppState, Event};
//! use secretgrid::Config;
//!
//! let mut state = AppState::new(&Config::default());
//! let (changed, actions) = handle_event(&mut state, &Event::MoveDown)?;
//! assert!(!changed);
//! assert!(actions.is_empty());
//! # Ok::<(), secretgrid::domain::GridError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod keys;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use keys::{map_key, Key};
pub use modes::Screen;
pub use state::{AppState, DetailView};
