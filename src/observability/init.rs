//! Subscriber setup.

use super::{exporter, SERVICE_NAME};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber when `config.trace_level` is set.
///
/// Spans go through an OpenTelemetry layer to `config.trace_file`. The parent
/// directory is created if missing. Observability is optional, so any failure
/// (an unwritable directory, a subscriber already installed) leaves tracing as
/// it was and the call returns quietly. Only the first successful call takes
/// effect.
pub fn init_tracing(config: &Config) {
    let Some(level) = config.trace_level.as_deref() else {
        return;
    };

    if let Some(parent) = config.trace_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = exporter::file_tracer_provider(config.trace_file.clone(), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
