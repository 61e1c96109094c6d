//! User interface boundary.
//!
//! This crate does not draw anything. It exposes what a renderer needs to
//! draw the grid as a plain view model:
//!
//! ```text
//! AppState → compute_viewmodel → GridViewModel → (external renderer)
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state

pub mod viewmodel;

pub use viewmodel::{
    DetailInfo, DisplayCell, EmptyState, FilterBarInfo, FooterInfo, GridViewModel, HeaderInfo,
    RemotePageInfo,
};
