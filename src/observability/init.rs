//! Tracing initialization and subscriber setup.
//!
//! This module configures the tracing subscriber with OpenTelemetry
//! integration, wiring the complete pipeline from `tracing` macros to the
//! file-based span exporter.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::Config;

use super::export;

/// Initializes the tracing subscriber with file-based span export.
///
/// The span level comes from `config.trace_level` (default `"info"`).
/// Traces land in `userdeck-traces.jsonl` inside the plugin data directory.
///
/// Initialization is best-effort and idempotent: if the data directory
/// cannot be created the plugin simply runs without traces, and only the
/// first call installs a subscriber.
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        "userdeck",
    )]);

    let trace_file = data_dir.join("userdeck-traces.jsonl");
    let provider = export::create_tracer_provider(trace_file, resource);

    let tracer = provider.tracer("userdeck");
    let otel_layer = OpenTelemetryLayer::new(tracer);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer);

    let _ = subscriber.try_init();
}
