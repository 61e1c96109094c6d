//! Fetch request sequencing.
//!
//! Every fetch the controller dispatches gets a [`RequestId`] from a
//! monotonically increasing counter, and at most one request is in flight at a
//! time. A completion is applied only if its id matches the in-flight slot;
//! anything else is a stale response from a superseded request and is dropped.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequence number attached to a fetch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Why a fetch was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchKind {
    /// Reload page 0 from scratch.
    Refresh,

    /// Fetch the page after the one at `from_index`.
    Advance { from_index: usize },
}

/// The request currently awaiting a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InFlight {
    pub id: RequestId,
    pub kind: FetchKind,
}

/// Issues request ids and guards the single in-flight slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTracker {
    last_issued: u64,
    in_flight: Option<InFlight>,
}

impl RequestTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_issued: 0,
            in_flight: None,
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub const fn in_flight(&self) -> Option<&InFlight> {
        self.in_flight.as_ref()
    }

    fn issue(&mut self, kind: FetchKind) -> RequestId {
        self.last_issued += 1;
        let id = RequestId(self.last_issued);
        self.in_flight = Some(InFlight { id, kind });
        id
    }

    /// Issues a request only if none is in flight.
    pub fn try_begin(&mut self, kind: FetchKind) -> Option<RequestId> {
        if let Some(current) = self.in_flight {
            tracing::debug!(in_flight = %current.id, ?kind, "fetch refused, request already in flight");
            return None;
        }
        Some(self.issue(kind))
    }

    /// Issues a request, replacing any in-flight one.
    ///
    /// The replaced request's response will be discarded by [`complete`](Self::complete).
    pub fn supersede(&mut self, kind: FetchKind) -> RequestId {
        if let Some(current) = self.in_flight {
            tracing::debug!(superseded = %current.id, ?kind, "in-flight request superseded");
        }
        self.issue(kind)
    }

    /// Marks `id` complete and returns why it was issued.
    ///
    /// Returns `None` for stale ids; the in-flight slot is left untouched.
    pub fn complete(&mut self, id: RequestId) -> Option<FetchKind> {
        match self.in_flight {
            Some(current) if current.id == id => {
                self.in_flight = None;
                Some(current.kind)
            }
            _ => {
                tracing::debug!(request = %id, latest = self.last_issued, "stale response discarded");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase_monotonically() {
        let mut tracker = RequestTracker::new();
        let first = tracker.supersede(FetchKind::Refresh);
        let second = tracker.supersede(FetchKind::Refresh);
        assert!(second > first);
    }

    #[test]
    fn try_begin_refuses_while_loading() {
        let mut tracker = RequestTracker::new();
        let id = tracker.try_begin(FetchKind::Advance { from_index: 0 }).unwrap();
        assert!(tracker.is_loading());
        assert_eq!(tracker.try_begin(FetchKind::Advance { from_index: 0 }), None);

        assert_eq!(tracker.complete(id), Some(FetchKind::Advance { from_index: 0 }));
        assert!(!tracker.is_loading());
        assert!(tracker.try_begin(FetchKind::Refresh).is_some());
    }

    #[test]
    fn superseded_response_is_stale() {
        let mut tracker = RequestTracker::new();
        let old = tracker.try_begin(FetchKind::Advance { from_index: 2 }).unwrap();
        let new = tracker.supersede(FetchKind::Refresh);

        assert_eq!(tracker.complete(old), None);
        assert!(tracker.is_loading());
        assert_eq!(tracker.complete(new), Some(FetchKind::Refresh));
        assert_eq!(tracker.complete(new), None);
    }
}
