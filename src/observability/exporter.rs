//! Span exporter that appends [`SpanRecord`] lines to a rotating file.

use super::record::SpanRecord;
use super::rotating::RotatingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::{Config, TracerProvider};
use std::path::PathBuf;

#[derive(Debug)]
pub struct JsonLinesExporter {
    service: String,
    writer: RotatingFile,
}

impl JsonLinesExporter {
    pub fn new(service: &str, path: PathBuf) -> Self {
        Self {
            service: service.to_string(),
            writer: RotatingFile::new(path),
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        for span in batch {
            let line = serde_json::to_string(&SpanRecord::from_span(&self.service, span))
                .map_err(|e| TraceError::Other(Box::new(e)))?;
            self.writer
                .append_line(&line)
                .map_err(|e| TraceError::Other(Box::new(e)))?;
        }
        Ok(())
    }
}

impl SpanExporter for JsonLinesExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = self.write_batch(&batch);
        Box::pin(std::future::ready(result))
    }
}

/// Builds a provider that exports every finished span synchronously.
///
/// The plugin runs single-threaded in WASM, so there is no batch processor.
pub fn provider(service: &str, path: PathBuf) -> TracerProvider {
    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        service.to_string(),
    )]);

    TracerProvider::builder()
        .with_config(Config::default().with_resource(resource))
        .with_simple_exporter(JsonLinesExporter::new(service, path))
        .build()
}
