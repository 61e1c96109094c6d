//! Actions representing side effects to be executed by the host.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! host executes them in order: posting to the fetch worker, or shutting down.
//!
//! # Example
//!
//! ```rust
//! use secretgrid::app::Action;
//! use secretgrid::domain::CredentialContext;
//! use secretgrid::paging::RequestId;
//! use secretgrid::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::list_page(RequestId(1), CredentialContext::default(), None, 50)),
//! ];
//! ```

use crate::worker::WorkerMessage;

/// Side effects requested by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Stop the application.
    Quit,

    /// Send a request to the fetch worker.
    ///
    /// Its response comes back later as an [`Event`](super::Event) via
    /// `From<WorkerResponse>`.
    PostToWorker(WorkerMessage),
}
