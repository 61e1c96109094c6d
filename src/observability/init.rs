//! Subscriber setup.

use super::file_writer::RotatingFileWriter;
use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "secretgrid";
const SPAN_FILE: &str = "secretgrid-spans.jsonl";

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Installs the global subscriber that exports spans to
/// `<data_dir>/secretgrid-spans.jsonl`.
///
/// The filter comes from `config.trace_level`, falling back to `RUST_LOG`
/// and then `"info"`. Only the first call has any effect. Tracing is
/// optional: if the data directory cannot be created nothing is installed.
///
/// Returns `true` if this call installed the subscriber.
///
/// # Example
///
/// ```rust,no_run
/// use secretgrid::observability::init_tracing;
/// use secretgrid::Config;
///
/// let config = Config {
///     trace_level: Some("secretgrid=debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) -> bool {
    init_tracing_in(&crate::infrastructure::paths::get_data_dir(), config)
}

/// Same as [`init_tracing`] with an explicit output directory.
pub fn init_tracing_in(data_dir: &Path, config: &Config) -> bool {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return false;
    }

    if std::fs::create_dir_all(data_dir).is_err() {
        INITIALIZED.store(false, Ordering::SeqCst);
        return false;
    }

    let filter = config.trace_level.as_deref().map_or_else(
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        EnvFilter::new,
    );

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        SERVICE_NAME,
    )]);
    let writer = RotatingFileWriter::new(data_dir.join(SPAN_FILE));
    let provider = tracer::create_tracer_provider(writer, resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_call_is_a_no_op() {
        // The subscriber outlives this test, so its directory must too.
        let dir = std::env::temp_dir().join(format!("secretgrid-init-{}", std::process::id()));
        let config = Config {
            trace_level: Some("secretgrid=debug".to_string()),
            ..Config::default()
        };
        init_tracing_in(&dir, &config);
        assert!(!init_tracing_in(&dir, &config));
    }
}
