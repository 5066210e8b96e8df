//! File-based span exporter.
//!
//! Implements the OpenTelemetry `SpanExporter` trait by appending one
//! compact JSON object per span to a trace file, suitable for offline
//! inspection with line-oriented tools. The file is size-capped: when it
//! grows past the limit it is rotated to a single `.1` backup, so trace
//! output never consumes unbounded disk space.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;

/// Maximum trace file size before rotation (10 MB).
const MAX_TRACE_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Span exporter writing one JSON line per span.
struct FileSpanExporter {
    /// Path of the active trace file.
    path: PathBuf,
    /// Service name stamped on every line.
    service: String,
    /// Prevents export after shutdown.
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    fn new(path: PathBuf, resource: &Resource) -> Self {
        let service = resource
            .get(opentelemetry::Key::from_static_str("service.name"))
            .map_or_else(|| "unknown".to_string(), |v| v.to_string());
        Self {
            path,
            service,
            is_shutdown: AtomicBool::new(false),
        }
    }

    /// Serializes a span into the compact line format.
    fn format_span(&self, span: &SpanData) -> serde_json::Value {
        let attributes: serde_json::Map<String, serde_json::Value> = span
            .attributes
            .iter()
            .map(|kv| (kv.key.to_string(), kv.value.to_string().into()))
            .collect();

        let parent = if span.parent_span_id == SpanId::INVALID {
            serde_json::Value::Null
        } else {
            format!("{:016x}", span.parent_span_id).into()
        };

        let status = match &span.status {
            Status::Unset => serde_json::json!("unset"),
            Status::Ok => serde_json::json!("ok"),
            Status::Error { description } => serde_json::json!({ "error": description }),
        };

        serde_json::json!({
            "service": self.service,
            "trace_id": format!("{:032x}", span.span_context.trace_id()),
            "span_id": format!("{:016x}", span.span_context.span_id()),
            "parent_span_id": parent,
            "name": span.name,
            "kind": format!("{:?}", span.span_kind),
            "start_unix_nanos": unix_nanos(span.start_time),
            "end_unix_nanos": unix_nanos(span.end_time),
            "status": status,
            "attributes": attributes,
        })
    }

    /// Appends lines to the trace file, rotating it first if it has grown
    /// past the size cap. The previous generation is kept as `<path>.1`.
    fn write_lines(&self, lines: &str) -> std::io::Result<()> {
        if let Ok(metadata) = std::fs::metadata(&self.path) {
            if metadata.len() > MAX_TRACE_FILE_BYTES {
                let backup = PathBuf::from(format!("{}.1", self.path.display()));
                std::fs::rename(&self.path, backup)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(lines.as_bytes())
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        let mut lines = String::new();
        for span in &batch {
            lines.push_str(&self.format_span(span).to_string());
            lines.push('\n');
        }

        let result = self
            .write_lines(&lines)
            .map_err(|e| TraceError::from(e.to_string()));
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("path", &self.path)
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}

/// Nanoseconds since the Unix epoch, saturating on clock weirdness.
fn unix_nanos(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
}

/// Creates a tracer provider exporting to the given file.
///
/// Uses the simple (immediate, non-batched) export strategy; the host can
/// tear the plugin down at any point.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(file_path, &resource);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
