//! Flattens finished spans into one JSON object per line.
//!
//! ```json
//! {"service":"lensdrop","name":"handle_event","trace_id":"…","span_id":"…",
//!  "start":"2026-10-18T09:12:03.104211Z","duration_us":412,"status":"unset",
//!  "attributes":{"event":"submit"},"events":[]}
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use opentelemetry::trace::{SpanId, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::SystemTime;

#[derive(Debug, Serialize)]
pub struct SpanRecord {
    pub service: String,
    pub name: String,
    pub trace_id: String,
    pub span_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_span_id: Option<String>,
    pub start: String,
    pub duration_us: u64,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    pub attributes: BTreeMap<String, serde_json::Value>,
    pub events: Vec<EventRecord>,
}

#[derive(Debug, Serialize)]
pub struct EventRecord {
    pub at: String,
    pub name: String,
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl SpanRecord {
    pub fn from_span(service: &str, span: &SpanData) -> Self {
        let parent_span_id =
            (span.parent_span_id != SpanId::INVALID).then(|| span.parent_span_id.to_string());

        let (status, status_message) = match &span.status {
            Status::Unset => ("unset", None),
            Status::Ok => ("ok", None),
            Status::Error { description } => ("error", Some(description.to_string())),
        };

        let duration_us = span
            .end_time
            .duration_since(span.start_time)
            .map_or(0, |d| u64::try_from(d.as_micros()).unwrap_or(u64::MAX));

        Self {
            service: service.to_string(),
            name: span.name.to_string(),
            trace_id: span.span_context.trace_id().to_string(),
            span_id: span.span_context.span_id().to_string(),
            parent_span_id,
            start: timestamp(span.start_time),
            duration_us,
            status: status.to_string(),
            status_message,
            attributes: attribute_map(&span.attributes),
            events: span
                .events
                .iter()
                .map(|event| EventRecord {
                    at: timestamp(event.timestamp),
                    name: event.name.to_string(),
                    attributes: attribute_map(&event.attributes),
                })
                .collect(),
        }
    }
}

fn timestamp(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn attribute_map(attributes: &[KeyValue]) -> BTreeMap<String, serde_json::Value> {
    attributes
        .iter()
        .map(|kv| (kv.key.to_string(), json_value(&kv.value)))
        .collect()
}

fn json_value(value: &Value) -> serde_json::Value {
    match value {
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::I64(i) => serde_json::Value::from(*i),
        Value::F64(f) => serde_json::Number::from_f64(*f)
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        Value::String(s) => serde_json::Value::String(s.to_string()),
        other => serde_json::Value::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn timestamps_are_utc_with_microseconds() {
        let time = SystemTime::UNIX_EPOCH + Duration::from_micros(1_500_000);
        assert_eq!(timestamp(time), "1970-01-01T00:00:01.500000Z");
    }

    #[test]
    fn attributes_keep_their_json_types() {
        let attributes = [
            KeyValue::new("event", "submit"),
            KeyValue::new("generation", 7_i64),
            KeyValue::new("stale", false),
            KeyValue::new("ratio", f64::NAN),
        ];
        let map = attribute_map(&attributes);

        assert_eq!(map["event"], serde_json::json!("submit"));
        assert_eq!(map["generation"], serde_json::json!(7));
        assert_eq!(map["stale"], serde_json::json!(false));
        assert_eq!(map["ratio"], serde_json::Value::Null);
    }
}
