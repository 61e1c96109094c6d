//! Background thread hosting a [`FetchWorker`].
//!
//! The controller posts [`WorkerMessage`]s and later drains [`WorkerResponse`]s
//! on its own thread, converting each into an [`Event`](crate::app::Event).
//! State is never touched from the worker side. Dropping the handle closes the
//! request channel and joins the thread once its current call returns.

use super::handler::FetchWorker;
use super::messages::{WorkerMessage, WorkerResponse};
use crate::domain::{GridError, Result};
use crate::source::Source;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::JoinHandle;
use std::time::Duration;

const THREAD_NAME: &str = "secretgrid-fetch";

/// Handle to the fetch worker thread.
pub struct WorkerThread {
    tx: Option<Sender<WorkerMessage>>,
    rx: Receiver<WorkerResponse>,
    handle: Option<JoinHandle<()>>,
}

impl WorkerThread {
    /// Spawns the worker thread around `source`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Io`] if the OS refuses to spawn the thread.
    pub fn spawn(source: Box<dyn Source>) -> Result<Self> {
        let (tx_request, rx_request) = channel::<WorkerMessage>();
        let (tx_response, rx_response) = channel::<WorkerResponse>();

        let handle = std::thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || {
                let mut worker = FetchWorker::new(source);
                tracing::debug!("fetch worker started");
                for message in rx_request {
                    let response = worker.handle_message(message);
                    if tx_response.send(response).is_err() {
                        break;
                    }
                }
                tracing::debug!("fetch worker stopped");
            })?;

        Ok(Self {
            tx: Some(tx_request),
            rx: rx_response,
            handle: Some(handle),
        })
    }

    /// Queues a request for the worker.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Worker`] if the worker thread has exited.
    pub fn post(&self, message: WorkerMessage) -> Result<()> {
        self.tx
            .as_ref()
            .ok_or_else(|| GridError::Worker("worker channel closed".to_string()))?
            .send(message)
            .map_err(|_| GridError::Worker("worker thread has exited".to_string()))
    }

    /// Returns a response if one is ready, without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Worker`] if the worker thread has exited.
    pub fn try_recv(&self) -> Result<Option<WorkerResponse>> {
        match self.rx.try_recv() {
            Ok(response) => Ok(Some(response)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(GridError::Worker("worker thread has exited".to_string())),
        }
    }

    /// Waits up to `timeout` for the next response.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Worker`] if the worker thread has exited.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<WorkerResponse>> {
        match self.rx.recv_timeout(timeout) {
            Ok(response) => Ok(Some(response)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(GridError::Worker("worker thread has exited".to_string())),
        }
    }
}

impl Drop for WorkerThread {
    fn drop(&mut self) {
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("fetch worker thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CredentialContext, Item};
    use crate::paging::RequestId;
    use crate::source::FixtureSource;

    #[test]
    fn responses_come_back_in_request_order() {
        let source = FixtureSource::new(vec![Item::new("1", "a"), Item::new("2", "b")]);
        let worker = WorkerThread::spawn(Box::new(source)).unwrap();

        for id in 1..=3 {
            worker
                .post(WorkerMessage::list_page(RequestId(id), CredentialContext::default(), None, 1))
                .unwrap();
        }

        let ids: Vec<RequestId> = (0..3)
            .map(|_| match worker.recv_timeout(Duration::from_secs(5)).unwrap() {
                Some(WorkerResponse::PageListed { request, .. }) => request,
                other => panic!("unexpected response: {other:?}"),
            })
            .collect();
        assert_eq!(ids, [RequestId(1), RequestId(2), RequestId(3)]);
        assert!(worker.try_recv().unwrap().is_none());
    }
}
