//! Tracing export for the plugin.
//!
//! `tracing` spans go through `tracing-opentelemetry` into the OpenTelemetry
//! SDK, whose exporter writes one JSON object per finished span:
//!
//! ```text
//! tracing → OpenTelemetryLayer → TracerProvider → JsonLinesExporter → file
//! ```
//!
//! The file lives at `~/.local/share/zellij/lensdrop/lensdrop-traces.jsonl`
//! (`/host/.local/share/zellij/lensdrop` inside the sandbox) and rotates at
//! 8 MiB, keeping two backups.
//!
//! ```rust
//! use lensdrop::observability::init_tracing;
//! use lensdrop::Config;
//!
//! init_tracing(&Config {
//!     trace_level: Some("lensdrop=debug".to_string()),
//!     ..Config::default()
//! });
//! tracing::debug!("tracing is active");
//! ```

mod exporter;
mod init;
mod record;
mod rotating;

pub use init::init_tracing;
