//! Search domain model.
//!
//! Types describing one search round trip: what the user asked for
//! ([`SearchRequest`]), what came back ([`ResultDescriptor`]), and the
//! lifecycle of the request as seen by the UI ([`SearchOutcome`]).

use serde::{Deserialize, Serialize};

/// Kind of search request, used for request routing and error prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Text,
    Image,
}

impl SearchKind {
    /// Prefix put in front of failure messages for this kind of request.
    #[must_use]
    pub const fn failure_prefix(self) -> &'static str {
        match self {
            Self::Text => "Error performing search",
            Self::Image => "Error processing image",
        }
    }
}

/// A backend-provided reference to one matched image.
///
/// `path` is either an absolute URL or a path relative to the backend root.
/// Any other fields in the backend payload (such as `score`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultDescriptor {
    pub path: String,
}

impl ResultDescriptor {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// An image file picked or dropped by the user.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name without directories, sent as the multipart filename.
    pub name: String,
    /// MIME type derived from the file extension.
    pub mime_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    #[must_use]
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Whether the MIME type denotes an image.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// File size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

impl std::fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// A validated search request, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRequest {
    /// Non-empty, trimmed query text.
    Text(String),
    /// An image whose MIME type starts with `image/`.
    Image(SelectedFile),
}

impl SearchRequest {
    /// Builds a text request, or `None` if the query trims to empty.
    ///
    /// ```
    /// use lensdrop::domain::SearchRequest;
    ///
    /// assert_eq!(SearchRequest::text("  cat "), Some(SearchRequest::Text("cat".into())));
    /// assert_eq!(SearchRequest::text("   "), None);
    /// ```
    #[must_use]
    pub fn text(query: &str) -> Option<Self> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self::Text(trimmed.to_string()))
        }
    }

    /// Builds an image request, or `None` if the file is not an image.
    #[must_use]
    pub fn image(file: SelectedFile) -> Option<Self> {
        file.is_image().then_some(Self::Image(file))
    }
}

/// Lifecycle of the live search as seen by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchOutcome {
    /// Nothing searched yet, or the view was reset by a mode switch.
    #[default]
    Idle,
    /// A request is in flight.
    Pending,
    /// The backend answered with an ordered list of matches.
    Success(Vec<ResultDescriptor>),
    /// The request failed; the message is what the status surface shows.
    Failure(String),
}

impl SearchOutcome {
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Descriptors to render; empty for every non-success outcome.
    #[must_use]
    pub fn descriptors(&self) -> &[ResultDescriptor] {
        match self {
            Self::Success(results) => results,
            _ => &[],
        }
    }
}

/// The image the current results were searched for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPreview {
    /// The user's local file, shown while the upload is in flight.
    Local { name: String },
    /// The path the backend echoed back for the stored upload.
    Echoed { path: String },
}

/// Load state of one grid image.
///
/// Cells start [`ImageLoadState::Deferred`] and are resolved by a probe
/// request once the result set is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageLoadState {
    #[default]
    Deferred,
    Loaded,
    /// The image could not be fetched; rendered as a placeholder.
    Broken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_request_requires_image_mime() {
        let txt = SelectedFile::new("notes.txt", "text/plain", b"hi".to_vec());
        assert!(SearchRequest::image(txt).is_none());

        let jpg = SelectedFile::new("cat.jpg", "image/jpeg", vec![0xff, 0xd8]);
        assert!(matches!(SearchRequest::image(jpg), Some(SearchRequest::Image(f)) if f.name == "cat.jpg"));
    }

    #[test]
    fn descriptors_empty_unless_success() {
        assert!(SearchOutcome::Pending.descriptors().is_empty());
        assert!(SearchOutcome::Failure("boom".into()).descriptors().is_empty());
        let ok = SearchOutcome::Success(vec![ResultDescriptor::new("a.jpg")]);
        assert_eq!(ok.descriptors().len(), 1);
    }

    #[test]
    fn descriptor_ignores_extra_backend_fields() {
        let parsed: ResultDescriptor =
            serde_json::from_str(r#"{"path":"static/img/cat1.jpg","score":0.31}"#).unwrap();
        assert_eq!(parsed, ResultDescriptor::new("static/img/cat1.jpg"));
    }
}
