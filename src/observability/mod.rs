//! Tracing with OpenTelemetry spans exported to a local OTLP JSON file.
//!
//! A plugin cannot reach a collector, so spans go through a file exporter:
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK TracerProvider → FileSpanExporter → trace file
//! ```
//!
//! Spans land in `movie-gallery-otlp.json` under
//! [`get_data_dir`](crate::infrastructure::get_data_dir), one OTLP document
//! per line. The file rotates at 10 MB and keeps three backups.
//!
//! The level comes from the `trace_level` plugin option (default `info`) and
//! accepts any `EnvFilter` directive, e.g. `movie_gallery::tmdb=trace,info`.

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;

/// `service.name` resource attribute and instrumentation scope.
pub const SERVICE_NAME: &str = "MovieGallery";

/// File name of the trace file inside the data directory.
pub const TRACE_FILE_NAME: &str = "movie-gallery-otlp.json";
