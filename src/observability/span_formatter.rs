//! Flat JSON-lines span records.
//!
//! Each finished span becomes one [`SpanRecord`] serialized on its own line,
//! so the file can be read with `jq` or any line-oriented tool:
//!
//! ```json
//! {"service":"secretgrid","trace_id":"4bf9…","span_id":"00f0…","parent_span_id":null,
//!  "name":"list_page","start_unix_nanos":1700000000000000000,"duration_micros":412,
//!  "attributes":{"request":"#3"},"events":[],"status":"unset"}
//! ```

use std::collections::BTreeMap;
use std::time::{Duration, SystemTime};

use opentelemetry::trace::{SpanId, Status};
use opentelemetry::{Key, KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// One exported span.
#[derive(Debug, Clone, Serialize)]
pub struct SpanRecord {
    pub service: String,
    pub trace_id: String,
    pub span_id: String,
    pub parent_span_id: Option<String>,
    pub name: String,
    pub start_unix_nanos: u128,
    pub duration_micros: u128,
    pub attributes: BTreeMap<String, JsonValue>,
    pub events: Vec<EventRecord>,
    pub status: String,
}

/// A span event (usually a `tracing` log line inside a span).
#[derive(Debug, Clone, Serialize)]
pub struct EventRecord {
    pub name: String,
    pub unix_nanos: u128,
    pub attributes: BTreeMap<String, JsonValue>,
}

/// Builds [`SpanRecord`]s, stamping each with the resource's service name.
pub struct SpanFormatter {
    service: String,
}

impl SpanFormatter {
    #[must_use]
    pub fn new(resource: &Resource) -> Self {
        let service = resource
            .get(Key::from_static_str("service.name"))
            .map_or_else(|| "unknown".to_string(), |v| v.to_string());
        Self { service }
    }

    #[must_use]
    pub fn record(&self, span: &SpanData) -> SpanRecord {
        let parent_span_id =
            (span.parent_span_id != SpanId::INVALID).then(|| format!("{:016x}", span.parent_span_id));

        SpanRecord {
            service: self.service.clone(),
            trace_id: format!("{:032x}", span.span_context.trace_id()),
            span_id: format!("{:016x}", span.span_context.span_id()),
            parent_span_id,
            name: span.name.to_string(),
            start_unix_nanos: unix_nanos(span.start_time),
            duration_micros: span
                .end_time
                .duration_since(span.start_time)
                .unwrap_or(Duration::ZERO)
                .as_micros(),
            attributes: attribute_map(&span.attributes),
            events: span
                .events
                .iter()
                .map(|event| EventRecord {
                    name: event.name.to_string(),
                    unix_nanos: unix_nanos(event.timestamp),
                    attributes: attribute_map(&event.attributes),
                })
                .collect(),
            status: status_label(&span.status),
        }
    }

    /// Serializes one span as a single JSON line.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn format_line(&self, span: &SpanData) -> serde_json::Result<String> {
        serde_json::to_string(&self.record(span))
    }
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter")
            .field("service", &self.service)
            .finish()
    }
}

fn unix_nanos(time: SystemTime) -> u128 {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos()
}

fn attribute_map(attributes: &[KeyValue]) -> BTreeMap<String, JsonValue> {
    attributes
        .iter()
        .map(|kv| (kv.key.to_string(), json_value(&kv.value)))
        .collect()
}

fn json_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::I64(i) => JsonValue::from(*i),
        Value::F64(f) => serde_json::Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
        Value::String(s) => JsonValue::String(s.to_string()),
        // Arrays are rare in tracing fields; keep their display form.
        Value::Array(_) => JsonValue::String(value.to_string()),
    }
}

fn status_label(status: &Status) -> String {
    match status {
        Status::Unset => "unset".to_string(),
        Status::Ok => "ok".to_string(),
        Status::Error { description } => format!("error: {description}"),
    }
}
