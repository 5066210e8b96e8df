//! OpenTelemetry-based observability with file-based trace export.
//!
//! Stdout belongs to the renderer in a Zellij plugin, so spans go to a file
//! instead: the pipeline is `tracing` macros → `tracing-opentelemetry` →
//! OpenTelemetry SDK → a custom span exporter that appends one JSON object
//! per span to a size-capped file under the plugin data directory.
//!
//! # Configuration
//!
//! The span level is controlled by the `trace_level` plugin configuration
//! key (default `"info"`).
//!
//! # Modules
//!
//! - [`init`]: Tracing initialization and subscriber setup
//! - [`export`]: File-based span exporter with rotation

mod export;
mod init;

pub use init::init_tracing;
