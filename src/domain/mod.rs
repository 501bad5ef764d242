//! Domain layer for the lensdrop plugin.
//!
//! Core search types and the error taxonomy, independent of Zellij APIs and of
//! the UI. Nothing in here performs I/O.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`search`]: Requests, result descriptors, outcomes and previews
//!
//! # Examples
//!
//! ```
//! use lensdrop::domain::{SearchOutcome, ResultDescriptor};
//!
//! let outcome = SearchOutcome::Success(vec![ResultDescriptor::new("static/img/cat1.jpg")]);
//! assert_eq!(outcome.descriptors().len(), 1);
//! ```

pub mod error;
pub mod search;

pub use error::{ImageSearchError, Result, SearchError};
pub use search::{
    ImageLoadState, ResultDescriptor, SearchKind, SearchOutcome, SearchRequest, SelectedFile,
    UploadPreview,
};
