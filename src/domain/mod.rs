//! Domain layer for secretgrid.
//!
//! This module contains the core value types shared by every other layer,
//! independent of how items are fetched or displayed.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: The listed item model
//! - [`page`]: Remote pages and continuation tokens
//! - [`context`]: Opaque credential context passed through to the source
//!
//! # Examples
//!
//! ```
//! use secretgrid::domain::{Item, RemotePage, Result};
//!
//! fn first_page() -> Result<RemotePage> {
//!     Ok(RemotePage::new(vec![Item::new("id-1", "prod/db")], None))
//! }
//! ```

pub mod context;
pub mod error;
pub mod item;
pub mod page;

pub use context::CredentialContext;
pub use error::{GridError, Result};
pub use item::Item;
pub use page::{ContinuationToken, RemotePage};
