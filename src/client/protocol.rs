//! HTTP contract with the search backend.
//!
//! Builds the requests the plugin sends and decodes what comes back. The
//! runtime performs the actual I/O; this module only deals in URLs, headers
//! and byte bodies so that everything here is testable without it.
//!
//! # Endpoints
//!
//! - `GET /search?search_query=<text>`
//! - `POST /search_by_image` with a multipart `file` field
//!
//! Both answer with `{ "results": [{"path": ...}], "uploaded_image"?: ... }`.
//! The text endpoint historically answers with a bare array of descriptors;
//! that shape is still accepted but logged as deprecated.

use super::context::{RequestContext, RequestKind};
use crate::domain::{ResultDescriptor, SearchError, SearchKind, SelectedFile};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Longest server error text carried into a status message.
const MAX_ERROR_DETAIL_CHARS: usize = 200;

/// HTTP methods the plugin issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A fully built web request, ready to hand to the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    pub context: RequestContext,
}

impl HttpRequest {
    /// Builds the text search request for an already trimmed, non-empty query.
    ///
    /// ```
    /// use lensdrop::client::{HttpRequest, RequestContext, RequestKind};
    /// use lensdrop::domain::SearchKind;
    ///
    /// let context = RequestContext::new(1, RequestKind::Search(SearchKind::Text));
    /// let request = HttpRequest::text_search("http://localhost:5000", "red cat", context);
    /// assert_eq!(request.url, "http://localhost:5000/search?search_query=red%20cat");
    /// ```
    #[must_use]
    pub fn text_search(backend_url: &str, query: &str, context: RequestContext) -> Self {
        Self {
            method: HttpMethod::Get,
            url: format!(
                "{backend_url}/search?search_query={}",
                urlencoding::encode(query)
            ),
            headers: BTreeMap::new(),
            body: Vec::new(),
            context,
        }
    }

    /// Builds the multipart upload for an image search.
    #[must_use]
    pub fn image_search(backend_url: &str, file: &SelectedFile, context: RequestContext) -> Self {
        let boundary = format!("lensdrop-{}", uuid::Uuid::new_v4().simple());
        let body = encode_multipart_file(&boundary, "file", file);

        let mut headers = BTreeMap::new();
        headers.insert(
            "Content-Type".to_string(),
            format!("multipart/form-data; boundary={boundary}"),
        );
        headers.insert("Content-Length".to_string(), body.len().to_string());

        Self {
            method: HttpMethod::Post,
            url: format!("{backend_url}/search_by_image"),
            headers,
            body,
            context,
        }
    }

    /// Builds the deferred load check for one grid image.
    #[must_use]
    pub fn image_probe(url: String, context: RequestContext) -> Self {
        debug_assert!(matches!(context.kind, RequestKind::Probe { .. }));
        Self {
            method: HttpMethod::Get,
            url,
            headers: BTreeMap::new(),
            body: Vec::new(),
            context,
        }
    }
}

/// Encodes a single-file `multipart/form-data` body.
fn encode_multipart_file(boundary: &str, field: &str, file: &SelectedFile) -> Vec<u8> {
    let filename: String = file
        .name
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .collect::<String>()
        .replace('"', "%22");

    let mut body = Vec::with_capacity(file.bytes.len() + 256);
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", file.mime_type).as_bytes());
    body.extend_from_slice(&file.bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

/// A successfully decoded search response.
///
/// The canonical body is `{ "results": [...], "uploaded_image"?: "..." }`.
/// A bare `[...]` of descriptors is still accepted but deprecated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResponse {
    pub results: Vec<ResultDescriptor>,
    pub uploaded_image: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ResponseBody {
    Envelope {
        results: Vec<ResultDescriptor>,
        #[serde(default)]
        uploaded_image: Option<String>,
    },
    Bare(Vec<ResultDescriptor>),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Decodes the backend's answer to a search request.
///
/// Non-success statuses become [`SearchError::Network`], carrying the
/// server's `{"error": ...}` text when present. A success body that matches
/// neither accepted shape becomes [`SearchError::MalformedResponse`]; nothing
/// is ever partially parsed.
///
/// # Errors
///
/// See above.
pub fn decode_search_response(
    kind: SearchKind,
    status: u16,
    body: &[u8],
) -> Result<SearchResponse, SearchError> {
    if !is_success(status) {
        return Err(SearchError::Network {
            status,
            detail: error_detail(body),
        });
    }

    let parsed: ResponseBody = serde_json::from_slice(body)
        .map_err(|e| SearchError::MalformedResponse(e.to_string()))?;

    let response = match parsed {
        ResponseBody::Envelope {
            results,
            uploaded_image,
        } => SearchResponse {
            results,
            uploaded_image: uploaded_image.filter(|p| !p.is_empty()),
        },
        ResponseBody::Bare(results) => {
            tracing::warn!(
                kind = ?kind,
                result_count = results.len(),
                "backend answered with a bare result array; expected a results envelope"
            );
            SearchResponse {
                results,
                uploaded_image: None,
            }
        }
    };

    Ok(response)
}

/// Whether an HTTP status denotes success.
#[must_use]
pub const fn is_success(status: u16) -> bool {
    status >= 200 && status < 300
}

/// Extracts a short, human-readable error text from a failure body.
fn error_detail(body: &[u8]) -> Option<String> {
    let text = serde_json::from_slice::<ErrorBody>(body).map_or_else(
        |_| {
            let raw = String::from_utf8_lossy(body);
            let trimmed = raw.trim();
            // HTML error pages are noise in a one-line status.
            (!trimmed.is_empty() && !trimmed.starts_with('<')).then(|| trimmed.to_string())
        },
        |parsed| Some(parsed.error),
    )?;

    Some(text.chars().take(MAX_ERROR_DETAIL_CHARS).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(kind: SearchKind) -> RequestContext {
        RequestContext::new(1, RequestKind::Search(kind))
    }

    #[test]
    fn text_query_is_percent_encoded() {
        let request = HttpRequest::text_search("http://h", "cats & dogs/100%", context(SearchKind::Text));
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(
            request.url,
            "http://h/search?search_query=cats%20%26%20dogs%2F100%25"
        );
        assert!(request.body.is_empty());
    }

    #[test]
    fn image_upload_is_single_file_multipart() {
        let file = SelectedFile::new("my \"cat\".jpg", "image/jpeg", vec![1, 2, 3]);
        let request = HttpRequest::image_search("http://h", &file, context(SearchKind::Image));

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "http://h/search_by_image");

        let content_type = request.headers.get("Content-Type").unwrap();
        let boundary = content_type
            .strip_prefix("multipart/form-data; boundary=")
            .unwrap();

        let mut expected = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"my %22cat%22.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n"
        )
        .into_bytes();
        expected.extend_from_slice(&[1, 2, 3]);
        expected.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
        assert_eq!(request.body, expected);
        assert_eq!(
            request.headers.get("Content-Length"),
            Some(&expected.len().to_string())
        );
    }

    #[test]
    fn envelope_and_bare_array_both_decode() {
        let envelope = decode_search_response(
            SearchKind::Image,
            200,
            br#"{"uploaded_image":"uploads/u1.jpg","results":[{"path":"a.jpg","score":0.9}]}"#,
        )
        .unwrap();
        assert_eq!(envelope.uploaded_image.as_deref(), Some("uploads/u1.jpg"));
        assert_eq!(envelope.results, vec![ResultDescriptor::new("a.jpg")]);

        let bare = decode_search_response(SearchKind::Text, 200, br#"[{"path":"b.jpg"}]"#).unwrap();
        assert_eq!(bare.uploaded_image, None);
        assert_eq!(bare.results, vec![ResultDescriptor::new("b.jpg")]);
    }

    #[test]
    fn error_status_carries_server_message() {
        let err = decode_search_response(
            SearchKind::Text,
            500,
            br#"{"error":"index not loaded"}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            SearchError::Network {
                status: 500,
                detail: Some("index not loaded".to_string())
            }
        );
    }

    #[test]
    fn html_error_page_is_not_used_as_detail() {
        let err = decode_search_response(SearchKind::Text, 502, b"<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err, SearchError::Network { status: 502, detail: None });
    }

    #[test]
    fn unexpected_success_body_is_malformed() {
        let bodies: [&[u8]; 3] = [b"not json", br#"{"error":"x"}"#, br#"{"results":"nope"}"#];
        for body in bodies {
            let err = decode_search_response(SearchKind::Text, 200, body).unwrap_err();
            assert!(matches!(err, SearchError::MalformedResponse(_)), "{err:?}");
        }
    }
}
