//! Fetch worker message types.
//!
//! This module defines the request and response protocol between the owning
//! controller thread and the fetch worker that talks to the [`Source`](crate::source::Source).
//! Every request carries an optional [`TraceContext`] so that worker spans link
//! to the event that caused them.
//!
//! Fetch failures travel as strings, which keeps both enums `Clone + Eq` and
//! serializable for hosts that pass them across a process or plugin boundary.

use crate::domain::{ContinuationToken, CredentialContext, RemotePage};
use crate::paging::RequestId;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span
    /// context is otherwise invalid.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            tracing::trace!("no valid span context to propagate");
            return None;
        }

        let context = Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        };
        tracing::trace!(trace_id = %context.trace_id, parent_span_id = %context.parent_span_id, "captured trace context");
        Some(context)
    }
}

/// Generates constructors for `WorkerMessage` variants that attach the current
/// trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    list_page(ListPage {
        request: RequestId,
        context: CredentialContext,
        token: Option<ContinuationToken>,
        page_size: usize,
    }),
    item_detail(ItemDetail { id: String, context: CredentialContext }),
}

/// Requests sent to the fetch worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// List one remote page.
    ListPage {
        /// Sequence id echoed back in the response.
        request: RequestId,

        context: CredentialContext,

        /// `None` for the first page.
        token: Option<ContinuationToken>,

        page_size: usize,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Look up one item's detail value.
    ItemDetail {
        id: String,

        context: CredentialContext,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Trace context attached to the message, if any.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::ListPage { trace_context, .. } | Self::ItemDetail { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }
}

/// Responses sent from the fetch worker back to the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// A page was listed.
    PageListed { request: RequestId, page: RemotePage },

    /// Listing failed; nothing should change except the error shown.
    ListFailed { request: RequestId, message: String },

    DetailLoaded { id: String, value: String },

    DetailFailed { id: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_leave_trace_context_empty_without_otel_layer() {
        let message = WorkerMessage::list_page(RequestId(3), CredentialContext::default(), None, 50);
        assert!(message.trace_context().is_none());
        assert!(matches!(
            message,
            WorkerMessage::ListPage { request: RequestId(3), page_size: 50, .. }
        ));
    }

    #[test]
    fn messages_round_trip_through_json() {
        let message = WorkerMessage::ItemDetail {
            id: "arn:1".into(),
            context: CredentialContext::new(Some("dev".into()), None),
            trace_context: Some(TraceContext {
                trace_id: "0af7651916cd43dd8448eb211c80319c".into(),
                parent_span_id: "b7ad6b7169203331".into(),
            }),
        };
        let json = serde_json::to_string(&message).unwrap();
        assert_eq!(serde_json::from_str::<WorkerMessage>(&json).unwrap(), message);
    }
}
