//! Search mode and the mode switch.
//!
//! Exactly one [`SearchMode`] is active at any time. It decides what the input
//! line means (query text or a file path) and which request a submit issues.
//!
//! Switching modes is a full view reset: results, status, preview, the input
//! line and the drop target indicator are all cleared, and any request still
//! in flight loses its right to touch the UI.
//!
//! # Example
//!
//! ```rust
//! use lensdrop::app::{modes::select_mode, SearchMode, SearchState};
//!
//! let mut state = SearchState::default();
//! select_mode(&mut state, SearchMode::Image);
//! assert_eq!(state.mode, SearchMode::Image);
//! ```

use super::state::SearchState;
use crate::domain::SearchOutcome;

/// Which kind of query is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Typed text is sent to `/search`.
    #[default]
    Text,

    /// A picked or dropped image is sent to `/search_by_image`.
    Image,
}

impl SearchMode {
    /// The mode a toggle switches to.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Text => Self::Image,
            Self::Image => Self::Text,
        }
    }

    /// Tab label shown in the header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "Text Search",
            Self::Image => "Image Search",
        }
    }
}

/// Activates `mode` and resets everything displayed.
///
/// Selecting the already active mode performs the same reset. Never issues a
/// request.
pub fn select_mode(state: &mut SearchState, mode: SearchMode) {
    tracing::debug!(from = ?state.mode, to = ?mode, "selecting search mode");

    state.mode = mode;
    state.invalidate_in_flight();
    state.outcome = SearchOutcome::Idle;
    state.preview = None;
    state.image_states.clear();
    state.status.clear();
    state.input.clear();
    state.drop_active = false;
}

/// Switches to the mode that is not active.
pub fn toggle_mode(state: &mut SearchState) {
    let next = state.mode.other();
    select_mode(state, next);
}
