//! Fetch worker for source calls off the controller thread.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: [`FetchWorker`], one response per request
//! - `thread`: [`WorkerThread`], a std thread hosting the worker behind channels

pub mod handler;
pub mod messages;
pub mod thread;

pub use handler::FetchWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
pub use thread::WorkerThread;
