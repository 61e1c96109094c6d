//! Fetch worker: runs source calls off the controller thread.
//!
//! [`FetchWorker`] owns the [`Source`] and turns each [`WorkerMessage`] into
//! exactly one [`WorkerResponse`]. It keeps no paging state of its own; the
//! controller decides what to fetch and discards stale answers.

use crate::domain::{GridError, Result};
use crate::source::Source;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Worker state for handling fetch requests.
pub struct FetchWorker {
    source: Box<dyn Source>,
}

impl FetchWorker {
    #[must_use]
    pub fn new(source: Box<dyn Source>) -> Self {
        Self { source }
    }

    /// Converts a source result into a response with consistent logging.
    fn handle_source_result<T, F, E>(operation: &str, result: Result<T>, on_success: F, on_error: E) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
        E: FnOnce(String) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation, "source call successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation, error = %e, "source call failed");
                on_error(e.to_string())
            }
        }
    }

    /// Attaches the parent trace context carried by `message` to this thread.
    ///
    /// The returned guard must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes one message and returns its response.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        match message {
            WorkerMessage::ListPage {
                request,
                context,
                token,
                page_size,
                ..
            } => {
                let _span = tracing::debug_span!(
                    "worker_list_page",
                    %request,
                    %context,
                    first_page = token.is_none(),
                    page_size
                )
                .entered();

                Self::handle_source_result(
                    "list page",
                    self.source.list_page(&context, token.as_ref(), page_size),
                    |page| {
                        tracing::debug!(items = page.len(), has_next = page.next_token.is_some(), "page listed");
                        WorkerResponse::PageListed { request, page }
                    },
                    |message| WorkerResponse::ListFailed { request, message },
                )
            }

            WorkerMessage::ItemDetail { id, context, .. } => {
                let _span = tracing::debug_span!("worker_item_detail", id = %id, %context).entered();

                let result = self.source.item_detail(&context, &id);
                let failed_id = id.clone();
                Self::handle_source_result(
                    "item detail",
                    result,
                    |value| WorkerResponse::DetailLoaded { id, value },
                    |message| WorkerResponse::DetailFailed { id: failed_id, message },
                )
            }
        }
    }

    /// Handles a JSON-serialized message and returns the JSON-serialized response.
    ///
    /// Entry point for hosts that ferry worker traffic as strings.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Worker`] if the payload is not a valid message or
    /// the response cannot be serialized.
    pub fn handle_payload(&mut self, payload: &str) -> Result<String> {
        let message: WorkerMessage = serde_json::from_str(payload)
            .map_err(|e| GridError::Worker(format!("failed to deserialize worker message: {e}")))?;

        let response = self.handle_message(message);

        serde_json::to_string(&response)
            .map_err(|e| GridError::Worker(format!("failed to serialize worker response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CredentialContext, ContinuationToken, Item};
    use crate::paging::RequestId;
    use crate::source::FixtureSource;
    use std::collections::HashMap;

    fn worker() -> FetchWorker {
        let items = (0..3).map(|i| Item::new(format!("id-{i}"), format!("item-{i}"))).collect();
        let mut details = HashMap::new();
        details.insert("id-1".to_string(), "value-1".to_string());
        FetchWorker::new(Box::new(FixtureSource::new(items).with_details(details)))
    }

    #[test]
    fn list_page_echoes_request_id() {
        let response = worker().handle_message(WorkerMessage::list_page(
            RequestId(7),
            CredentialContext::default(),
            None,
            2,
        ));
        match response {
            WorkerResponse::PageListed { request, page } => {
                assert_eq!(request, RequestId(7));
                assert_eq!(page.items.len(), 2);
                assert_eq!(page.next_token, Some(ContinuationToken::new("offset:2")));
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn list_failure_becomes_list_failed() {
        let response = worker().handle_message(WorkerMessage::list_page(
            RequestId(1),
            CredentialContext::default(),
            Some(ContinuationToken::new("bogus")),
            2,
        ));
        assert!(matches!(
            response,
            WorkerResponse::ListFailed { request: RequestId(1), ref message } if message.contains("bogus")
        ));
    }

    #[test]
    fn detail_lookup_success_and_failure() {
        let mut worker = worker();
        let ctx = CredentialContext::default();
        assert_eq!(
            worker.handle_message(WorkerMessage::item_detail("id-1".into(), ctx.clone())),
            WorkerResponse::DetailLoaded {
                id: "id-1".into(),
                value: "value-1".into()
            }
        );
        assert!(matches!(
            worker.handle_message(WorkerMessage::item_detail("id-2".into(), ctx)),
            WorkerResponse::DetailFailed { ref id, .. } if id == "id-2"
        ));
    }

    #[test]
    fn json_payload_round_trip() {
        let request = serde_json::to_string(&WorkerMessage::list_page(
            RequestId(2),
            CredentialContext::default(),
            None,
            10,
        ))
        .unwrap();
        let reply = worker().handle_payload(&request).unwrap();
        let response: WorkerResponse = serde_json::from_str(&reply).unwrap();
        assert!(matches!(response, WorkerResponse::PageListed { request: RequestId(2), .. }));

        assert!(matches!(worker().handle_payload("{"), Err(GridError::Worker(_))));
    }
}
