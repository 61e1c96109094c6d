//! Remote pagination: the page cache and fetch request sequencing.
//!
//! - [`cache`]: Retained remote pages and the current remote index
//! - [`tracker`]: Request ids and the single in-flight slot

pub mod cache;
pub mod tracker;

pub use cache::{NextStep, RemotePageCache};
pub use tracker::{FetchKind, InFlight, RequestId, RequestTracker};
