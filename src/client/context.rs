//! Request context carried through the runtime's web request facility.
//!
//! Zellij echoes the context map of a web request back with its result. The
//! plugin stores everything needed to route the response there: which request
//! generation it belongs to, what kind of request it was, and the tracing
//! context of the span that issued it.

use crate::domain::error::{ImageSearchError, Result};
use crate::domain::SearchKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Marker identifying web request results issued by this plugin.
pub const CONTEXT_SOURCE: &str = "lensdrop";

const KEY_SOURCE: &str = "source";
const KEY_GENERATION: &str = "generation";
const KEY_KIND: &str = "kind";
const KEY_INDEX: &str = "index";
const KEY_TRACE_ID: &str = "trace_id";
const KEY_PARENT_SPAN_ID: &str = "parent_span_id";

/// Distributed tracing context for linking a response to its request span.
///
/// Captures the current trace and span IDs from OpenTelemetry so the span
/// that handles the response can be parented to the span that sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across the suspension point.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid or not sampled,
    /// which is always the case when tracing has not been initialized.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            Some(Self {
                trace_id: format!("{:032x}", span_context.trace_id()),
                parent_span_id: format!("{:016x}", span_context.span_id()),
            })
        } else {
            None
        }
    }

    /// Attaches this context as the remote parent of spans created while the
    /// returned guard is held.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }
}

/// What a web request was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// A text or image search.
    Search(SearchKind),
    /// A deferred load check for the grid cell at `index`.
    Probe { index: usize },
}

impl RequestKind {
    const fn tag(self) -> &'static str {
        match self {
            Self::Search(SearchKind::Text) => "text",
            Self::Search(SearchKind::Image) => "image",
            Self::Probe { .. } => "probe",
        }
    }
}

/// Routing information attached to every web request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Generation token of the search the request belongs to.
    pub generation: u64,
    pub kind: RequestKind,
    pub trace_context: Option<TraceContext>,
}

impl RequestContext {
    /// Creates a context for the given generation, capturing the current span.
    #[must_use]
    pub fn new(generation: u64, kind: RequestKind) -> Self {
        Self {
            generation,
            kind,
            trace_context: TraceContext::from_current(),
        }
    }

    /// Encodes the context as the string map the runtime echoes back.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(KEY_SOURCE.to_string(), CONTEXT_SOURCE.to_string());
        map.insert(KEY_GENERATION.to_string(), self.generation.to_string());
        map.insert(KEY_KIND.to_string(), self.kind.tag().to_string());
        if let RequestKind::Probe { index } = self.kind {
            map.insert(KEY_INDEX.to_string(), index.to_string());
        }
        if let Some(trace) = &self.trace_context {
            map.insert(KEY_TRACE_ID.to_string(), trace.trace_id.clone());
            map.insert(KEY_PARENT_SPAN_ID.to_string(), trace.parent_span_id.clone());
        }
        map
    }

    /// Decodes a context map echoed back by the runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ImageSearchError::Context`] if the map was not produced by
    /// [`RequestContext::to_map`].
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self> {
        if map.get(KEY_SOURCE).map(String::as_str) != Some(CONTEXT_SOURCE) {
            return Err(ImageSearchError::Context(
                "web request was not issued by this plugin".to_string(),
            ));
        }

        let generation = map
            .get(KEY_GENERATION)
            .and_then(|g| g.parse::<u64>().ok())
            .ok_or_else(|| ImageSearchError::Context("missing or invalid generation".to_string()))?;

        let kind = match map.get(KEY_KIND).map(String::as_str) {
            Some("text") => RequestKind::Search(SearchKind::Text),
            Some("image") => RequestKind::Search(SearchKind::Image),
            Some("probe") => {
                let index = map
                    .get(KEY_INDEX)
                    .and_then(|i| i.parse::<usize>().ok())
                    .ok_or_else(|| ImageSearchError::Context("probe without index".to_string()))?;
                RequestKind::Probe { index }
            }
            other => {
                return Err(ImageSearchError::Context(format!(
                    "unknown request kind: {other:?}"
                )))
            }
        };

        let trace_context = match (map.get(KEY_TRACE_ID), map.get(KEY_PARENT_SPAN_ID)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };

        Ok(Self {
            generation,
            kind,
            trace_context,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_context_survives_the_runtime_map() {
        let context = RequestContext {
            generation: 7,
            kind: RequestKind::Probe { index: 3 },
            trace_context: Some(TraceContext {
                trace_id: "0af7651916cd43dd8448eb211c80319c".to_string(),
                parent_span_id: "b7ad6b7169203331".to_string(),
            }),
        };
        let decoded = RequestContext::from_map(&context.to_map()).unwrap();
        assert_eq!(decoded, context);
    }

    #[test]
    fn foreign_context_is_rejected() {
        let mut map = BTreeMap::new();
        map.insert("generation".to_string(), "1".to_string());
        map.insert("kind".to_string(), "text".to_string());
        assert!(RequestContext::from_map(&map).is_err());
    }

    #[test]
    fn context_without_tracing_has_no_trace_keys() {
        let context = RequestContext::new(1, RequestKind::Search(SearchKind::Text));
        let map = context.to_map();
        assert!(!map.contains_key("trace_id"));
        assert_eq!(map.get("kind").map(String::as_str), Some("text"));
    }
}
