//! Subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::PathBuf;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and instrumentation scope name attached to every span.
pub const SERVICE_NAME: &str = "CandidateBrowser";

/// Trace file name inside the data directory.
pub const TRACE_FILE_NAME: &str = "candidate-browser-otlp.json";

/// Directive used when `trace_level` is not configured.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Location of the live trace file.
#[must_use]
pub fn trace_file_path() -> PathBuf {
    crate::infrastructure::get_data_dir().join(TRACE_FILE_NAME)
}

/// Installs the global subscriber: an [`EnvFilter`] built from
/// `config.trace_level` feeding an OpenTelemetry layer that exports to
/// [`trace_file_path`].
///
/// Does nothing if the data directory cannot be created. Calling it again
/// after a subscriber is installed is harmless.
///
/// ```no_run
/// use candidate_browser::observability::init_tracing;
/// use candidate_browser::Config;
///
/// let config = Config {
///     trace_level: Some("candidate_browser=debug".to_string()),
///     ..Config::default()
/// };
/// init_tracing(&config);
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_TRACE_LEVEL);
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACE_LEVEL));

    if std::fs::create_dir_all(crate::infrastructure::get_data_dir()).is_err() {
        return;
    }

    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = tracer::create_tracer_provider(trace_file_path(), resource, SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
