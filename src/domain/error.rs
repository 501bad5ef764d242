//! Error types for the lensdrop plugin.
//!
//! Two families live here:
//!
//! - [`ImageSearchError`]: ambient failures (configuration, I/O, theme loading)
//!   that surface through the crate-wide [`Result`] alias.
//! - [`SearchError`]: failures of a single search attempt. These never escape
//!   the search orchestrator; they are converted to a user-facing message and
//!   stored as a failed outcome (or, for validation, shown as a status error).
//!
//! Both are implemented with `thiserror`.

use thiserror::Error;

/// Ambient error type for plugin operations outside the search lifecycle.
///
/// # Examples
///
/// ```
/// use lensdrop::domain::ImageSearchError;
///
/// fn validate_config() -> Result<(), ImageSearchError> {
///     Err(ImageSearchError::Config("backend_url must not be empty".to_string()))
/// }
/// assert!(validate_config().is_err());
/// ```
#[derive(Debug, Error)]
pub enum ImageSearchError {
    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A request context could not be encoded for the runtime.
    #[error("Request context error: {0}")]
    Context(String),
}

fn format_detail(detail: &Option<String>) -> String {
    detail.as_ref().map(|d| format!(": {d}")).unwrap_or_default()
}

/// A specialized `Result` type for ambient plugin operations.
pub type Result<T> = std::result::Result<T, ImageSearchError>;

/// Failure of one search attempt.
///
/// The `Display` output of each variant is the detail that follows the
/// per-kind prefix in the status surface (see [`SearchError::user_message`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The selected file was rejected locally, before any request was sent.
    ///
    /// The message is shown verbatim.
    #[error("{0}")]
    Validation(String),

    /// The request failed in transport or returned a non-success status.
    #[error("server returned HTTP {status}{}", format_detail(.detail))]
    Network {
        /// HTTP status code reported by the runtime.
        status: u16,
        /// Server-provided error text, if the body carried one.
        detail: Option<String>,
    },

    /// The body did not parse into the expected response shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The request did not resolve before its timer fired.
    #[error("request timed out after {0} seconds")]
    Timeout(u64),
}

impl SearchError {
    /// Validation error raised for files whose MIME type is not `image/*`.
    #[must_use]
    pub fn unsupported_file_type() -> Self {
        Self::Validation("Please upload an image file (JPEG, PNG, GIF)".to_string())
    }

    /// Validation error raised for files above the configured upload limit.
    ///
    /// Limits of a MiB or more are shown in whole MB, rounded up; smaller
    /// ones in KB, rounded up.
    #[must_use]
    pub fn file_too_large(max_bytes: u64) -> Self {
        const KIB: u64 = 1024;
        const MIB: u64 = 1024 * KIB;
        let limit = if max_bytes >= MIB {
            format!("{} MB", (max_bytes + MIB - 1) / MIB)
        } else {
            format!("{} KB", (max_bytes + KIB - 1) / KIB)
        };
        Self::Validation(format!("Image is too large (max {limit})"))
    }

    /// Returns the single message shown by the status surface.
    ///
    /// Validation errors are shown as-is; every other failure is prefixed with
    /// what was being attempted.
    ///
    /// ```
    /// use lensdrop::domain::{SearchError, SearchKind};
    ///
    /// let err = SearchError::Network { status: 500, detail: None };
    /// assert_eq!(
    ///     err.user_message(SearchKind::Text),
    ///     "Error performing search: server returned HTTP 500"
    /// );
    /// ```
    #[must_use]
    pub fn user_message(&self, kind: super::SearchKind) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            other => format!("{}: {other}", kind.failure_prefix()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SearchKind;

    #[test]
    fn network_error_includes_server_detail() {
        let err = SearchError::Network {
            status: 400,
            detail: Some("File type not allowed".to_string()),
        };
        assert_eq!(
            err.user_message(SearchKind::Image),
            "Error processing image: server returned HTTP 400: File type not allowed"
        );
    }

    #[test]
    fn validation_message_is_not_prefixed() {
        let err = SearchError::unsupported_file_type();
        assert_eq!(
            err.user_message(SearchKind::Image),
            "Please upload an image file (JPEG, PNG, GIF)"
        );
    }

    #[test]
    fn too_large_reports_limit_in_megabytes() {
        let err = SearchError::file_too_large(16 * 1024 * 1024);
        assert_eq!(err.to_string(), "Image is too large (max 16 MB)");
    }

    #[test]
    fn too_large_rounds_small_limits_up() {
        assert_eq!(
            SearchError::file_too_large(1536 * 1024).to_string(),
            "Image is too large (max 2 MB)"
        );
        assert_eq!(
            SearchError::file_too_large(500 * 1024).to_string(),
            "Image is too large (max 500 KB)"
        );
        assert_eq!(
            SearchError::file_too_large(4).to_string(),
            "Image is too large (max 1 KB)"
        );
    }
}
