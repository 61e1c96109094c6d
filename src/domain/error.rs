//! Error types for the secretgrid engine.
//!
//! This module defines the centralized error type [`GridError`] and a type alias
//! [`Result`] used throughout the crate. Empty listings and empty filter results
//! are never errors; they are ordinary states of the grid.

use thiserror::Error;

/// The main error type for secretgrid operations.
///
/// # Examples
///
/// ```
/// use secretgrid::domain::GridError;
///
/// fn list() -> Result<(), GridError> {
///     Err(GridError::Fetch("access denied".to_string()))
/// }
///
/// assert_eq!(list().unwrap_err().to_string(), "Fetch error: access denied");
/// ```
#[derive(Debug, Error)]
pub enum GridError {
    /// Listing a remote page failed (network, auth or source failure).
    ///
    /// Cache and navigation state are left exactly as they were before the
    /// attempt when this is reported.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Looking up an item's detail value failed.
    #[error("Source error: {0}")]
    Source(String),

    /// Advance was requested with no cached next page and no continuation token.
    #[error("No further remote pages")]
    Exhausted,

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Communication with the fetch worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for secretgrid operations.
pub type Result<T> = std::result::Result<T, GridError>;
