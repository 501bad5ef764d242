use super::exporter;
use crate::infrastructure::paths::get_data_dir;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "lensdrop";
const TRACE_FILE: &str = "lensdrop-traces.jsonl";
const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber.
///
/// Spans at or above `trace_level` (default `info`) are appended to
/// `lensdrop-traces.jsonl` in the plugin data directory. Tracing is optional:
/// if the directory cannot be created nothing is installed, and calls after
/// the first are no-ops.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let provider = exporter::provider(SERVICE_NAME, data_dir.join(TRACE_FILE));
    let layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}
