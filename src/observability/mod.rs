//! OpenTelemetry tracing exported to a local OTLP JSON file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → FileSpanExporter
//!                                                            │
//!                                       otlp::encode_batch ◄─┘
//!                                                            │
//!                                       RotatingFile (one JSON doc per line)
//! ```
//!
//! Tracing is off unless `trace_level` is configured. `RUST_LOG`, when set,
//! takes precedence over the configured level. The output file rotates once
//! it grows past 10 MB, keeping the three newest backups.
//!
//! ```rust
//! use catalog_list::observability::init_tracing;
//! use catalog_list::Config;
//!
//! let config = Config {
//!     trace_level: Some("debug".to_string()),
//!     trace_file: std::env::temp_dir().join("catalog-list-doc-otlp.json"),
//!     ..Default::default()
//! };
//! init_tracing(&config);
//! ```

mod exporter;
mod init;
mod otlp;
mod rotation;

pub use init::init_tracing;

/// Service and instrumentation scope name attached to every exported batch.
const SERVICE_NAME: &str = "catalog-list";
