//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point through which the host adapter
//! feeds user input and runtime results into the [`SearchState`]. It
//! delegates to the mode switch, the upload handler and the search
//! orchestrator, and returns whether to re-render plus the actions to
//! execute.
//!
//! # Event Types
//!
//! - **Mode**: `SelectMode`, `ToggleMode`
//! - **Input**: `Char`, `Backspace`, `Submit`, `Escape`
//! - **Upload**: `FileInput`, `Drag`
//! - **Runtime**: `WebResponse`, `Timer`, `PermissionsResult`
//!
//! # Example
//!
//! ```rust
//! use lensdrop::app::{handle_event, Event, SearchState};
//!
//! let mut state = SearchState::default();
//! for c in "cat".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (render, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(render);
//! assert!(!actions.is_empty());
//! # Ok::<(), lensdrop::domain::ImageSearchError>(())
//! ```

use super::actions::Action;
use super::modes::{select_mode, toggle_mode, SearchMode};
use super::orchestrator::{handle_response, handle_timer, search_by_text};
use super::state::SearchState;
use super::upload::{handle_drop, handle_file_input, DragEvent};
use crate::client::RequestContext;
use crate::domain::error::Result;
use crate::domain::SelectedFile;
use std::collections::BTreeMap;
use zellij_tile::prelude::PermissionType;

/// Events triggered by user input or by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Activates a specific search mode.
    SelectMode(SearchMode),
    /// Activates the mode that is not active.
    ToggleMode,

    /// Appends a character to the input buffer.
    ///
    /// In image mode this is a drag over the drop zone.
    Char(char),
    /// Removes the last character from the input buffer.
    Backspace,
    /// Runs a text search for the buffer contents.
    Submit,
    /// Cancels the drag or clears the buffer, closing the plugin when there
    /// is nothing left to cancel.
    Escape,
    /// Hides the plugin pane.
    CloseFocus,

    /// A file arrived through the file input channel.
    FileInput(Option<SelectedFile>),
    /// A drag event over the image drop zone.
    Drag(DragEvent),

    /// A web request issued by the plugin completed.
    WebResponse {
        status: u16,
        body: Vec<u8>,
        /// Context map echoed back by the runtime.
        context: BTreeMap<String, String>,
    },
    /// The oldest armed timer fired.
    Timer,

    /// Reports permissions granted after the permission request.
    PermissionsResult {
        granted: Vec<PermissionType>,
    },
}

/// Processes an event, mutates search state, and returns actions to execute.
///
/// The boolean is whether the UI needs re-rendering.
///
/// # Errors
///
/// Returns [`ImageSearchError::Context`](crate::domain::ImageSearchError::Context)
/// if a web response carries a context map this plugin did not produce.
pub fn handle_event(state: &mut SearchState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    match event {
        Event::SelectMode(mode) => {
            select_mode(state, *mode);
            Ok((true, vec![]))
        }
        Event::ToggleMode => {
            toggle_mode(state);
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            let was_empty = state.input.is_empty();
            state.input.push(*c);
            tracing::trace!(input_len = state.input.len(), "input updated");

            if state.mode == SearchMode::Image {
                let drag = if was_empty { DragEvent::Enter } else { DragEvent::Over };
                handle_drop(state, drag);
            }
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input.pop().is_none() {
                return Ok((false, vec![]));
            }
            if state.mode == SearchMode::Image && state.input.is_empty() {
                handle_drop(state, DragEvent::Leave);
            }
            Ok((true, vec![]))
        }
        Event::Submit => {
            if state.mode != SearchMode::Text {
                tracing::debug!("submit ignored outside text mode");
                return Ok((false, vec![]));
            }
            let query = state.input.clone();
            let actions = search_by_text(state, &query);
            Ok((!actions.is_empty(), actions))
        }
        Event::Escape => {
            if state.mode == SearchMode::Image && (state.drop_active || !state.input.is_empty()) {
                handle_drop(state, DragEvent::Leave);
                return Ok((true, vec![]));
            }
            if !state.input.is_empty() {
                state.input.clear();
                return Ok((true, vec![]));
            }
            Ok((false, vec![Action::CloseFocus]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::FileInput(file) => {
            let actions = handle_file_input(state, file.clone());
            Ok((true, actions))
        }
        Event::Drag(drag) => {
            let actions = handle_drop(state, drag.clone());
            Ok((true, actions))
        }
        Event::WebResponse {
            status,
            body,
            context,
        } => {
            let context = RequestContext::from_map(context)?;
            Ok(handle_response(state, *status, body, &context))
        }
        Event::Timer => Ok((handle_timer(state), vec![])),
        Event::PermissionsResult { granted } => {
            tracing::debug!(granted = ?granted, "permissions granted");
            Ok((false, vec![]))
        }
    }
}

impl Event {
    /// Short variant name for span fields; payloads can be large.
    const fn name(&self) -> &'static str {
        match self {
            Self::SelectMode(_) => "select_mode",
            Self::ToggleMode => "toggle_mode",
            Self::Char(_) => "char",
            Self::Backspace => "backspace",
            Self::Submit => "submit",
            Self::Escape => "escape",
            Self::CloseFocus => "close_focus",
            Self::FileInput(_) => "file_input",
            Self::Drag(_) => "drag",
            Self::WebResponse { .. } => "web_response",
            Self::Timer => "timer",
            Self::PermissionsResult { .. } => "permissions_result",
        }
    }
}
