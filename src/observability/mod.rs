//! Tracing with a file-based OpenTelemetry exporter.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK tracer provider → FileSpanExporter → JSON lines
//! ```
//!
//! Spans land in `~/.local/share/zellij/candidate-browser/candidate-browser-otlp.json`
//! (seen from the sandbox as `/host/.local/share/zellij/candidate-browser/...`),
//! one OTLP document per line. The file rotates at 10 MiB and three backups
//! are kept. The `trace_level` plugin option is an `EnvFilter` directive and
//! defaults to `info`.
//!
//! Outgoing requests carry the ids of the span that issued them, so the span
//! handling the response can be parented to it. See
//! [`crate::api::TraceContext`].

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use file_writer::{RotatingFileWriter, MAX_TRACE_BACKUPS, MAX_TRACE_FILE_BYTES};
pub use init::{init_tracing, trace_file_path, DEFAULT_TRACE_LEVEL, SERVICE_NAME, TRACE_FILE_NAME};
