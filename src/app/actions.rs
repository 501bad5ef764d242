//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! host adapter in `main.rs` executes them in order. Keeping them as data is
//! what lets every search flow be tested without the Zellij runtime.
//!
//! # Example
//!
//! ```rust
//! use lensdrop::app::Action;
//!
//! let actions = vec![Action::SetTimeout(30.0), Action::CloseFocus];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::client::HttpRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues a web request through the runtime.
    ///
    /// The result arrives later as a web response event carrying the
    /// request's context.
    WebRequest(HttpRequest),

    /// Arms a one-shot timer that fires after the given number of seconds.
    SetTimeout(f64),
}
