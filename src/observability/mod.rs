//! Span export to a local JSON-lines file.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → secretgrid-spans.jsonl
//! ```
//!
//! The active file rotates at 5 MB and keeps three numbered backups. The
//! filter level is taken from [`Config::trace_level`](crate::Config), then
//! `RUST_LOG`, then `"info"`.
//!
//! - [`init`]: subscriber installation
//! - [`tracer`]: exporter and tracer provider
//! - [`span_formatter`]: span to JSON record conversion
//! - [`file_writer`]: rotating line writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use file_writer::RotatingFileWriter;
pub use init::{init_tracing, init_tracing_in};
pub use span_formatter::{EventRecord, SpanRecord};
