//! Upload handler: file input and drag-and-drop normalization.
//!
//! Both channels end in [`on_file_selected`], which validates the file and
//! hands it to the search orchestrator. A rejected file never produces a
//! request and never changes the current outcome; only the status line shows
//! the validation message.
//!
//! In the terminal a "drag" is a path being typed or pasted into the image
//! mode drop zone. The first character is [`DragEvent::Enter`], each further
//! one [`DragEvent::Over`], Esc is [`DragEvent::Leave`] and Enter is
//! [`DragEvent::Drop`] carrying the file read from that path. All four are
//! consumed by the plugin and never forwarded to the host.

use super::actions::Action;
use super::modes::{select_mode, SearchMode};
use super::orchestrator::search_by_image;
use super::state::SearchState;
use crate::domain::{SearchError, SearchKind, SearchRequest, SelectedFile};

/// One step of a drag over the drop zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Enter,
    Over,
    Leave,
    /// The drag was released; `None` if nothing readable was dropped.
    Drop(Option<SelectedFile>),
}

/// Handles a file chosen through the file input channel.
///
/// A valid image switches to image mode (if needed) before dispatch. A
/// rejected file only shows the validation message; mode, outcome and any
/// in-flight request are left alone.
pub fn handle_file_input(state: &mut SearchState, file: Option<SelectedFile>) -> Vec<Action> {
    let file = match validate(file, state.settings.max_upload_bytes) {
        Ok(file) => file,
        Err(err) => return reject(state, &err),
    };
    if state.mode != SearchMode::Image {
        select_mode(state, SearchMode::Image);
    }
    on_file_selected(state, Some(file))
}

/// Handles one drag event over the drop zone.
///
/// The drop target indicator is on during enter/over and off after
/// leave/drop, whatever the validation result.
pub fn handle_drop(state: &mut SearchState, event: DragEvent) -> Vec<Action> {
    match event {
        DragEvent::Enter | DragEvent::Over => {
            state.drop_active = true;
            vec![]
        }
        DragEvent::Leave => {
            state.drop_active = false;
            state.input.clear();
            vec![]
        }
        DragEvent::Drop(file) => {
            state.drop_active = false;
            state.input.clear();
            on_file_selected(state, file)
        }
    }
}

/// Validates a selected file and dispatches the image search.
pub fn on_file_selected(state: &mut SearchState, file: Option<SelectedFile>) -> Vec<Action> {
    match validate(file, state.settings.max_upload_bytes) {
        Ok(file) => search_by_image(state, &file),
        Err(err) => reject(state, &err),
    }
}

fn reject(state: &mut SearchState, err: &SearchError) -> Vec<Action> {
    tracing::info!(error = %err, "rejected selected file");
    state.status.set_error(Some(err.user_message(SearchKind::Image)));
    vec![]
}

fn validate(file: Option<SelectedFile>, max_upload_bytes: u64) -> Result<SelectedFile, SearchError> {
    let file = file.ok_or_else(SearchError::unsupported_file_type)?;

    let Some(SearchRequest::Image(file)) = SearchRequest::image(file) else {
        tracing::debug!("selected file is not an image");
        return Err(SearchError::unsupported_file_type());
    };

    if file.size() > max_upload_bytes {
        tracing::debug!(name = %file.name, size = file.size(), max_upload_bytes, "file too large");
        return Err(SearchError::file_too_large(max_upload_bytes));
    }

    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ResultDescriptor, SearchOutcome};

    fn image_state() -> SearchState {
        let mut state = SearchState::default();
        state.mode = SearchMode::Image;
        state
    }

    #[test]
    fn text_file_drop_is_rejected_without_request() {
        let mut state = image_state();
        state.outcome = SearchOutcome::Success(vec![ResultDescriptor::new("a.jpg")]);
        let before = state.outcome.clone();

        handle_drop(&mut state, DragEvent::Enter);
        assert!(state.drop_active);

        let notes = SelectedFile::new("notes.txt", "text/plain", b"hello".to_vec());
        let actions = handle_drop(&mut state, DragEvent::Drop(Some(notes)));

        assert!(actions.is_empty());
        assert!(!state.drop_active);
        assert_eq!(state.outcome, before);
        assert_eq!(
            state.status.error(),
            Some("Please upload an image file (JPEG, PNG, GIF)")
        );
    }

    #[test]
    fn missing_file_is_a_validation_error() {
        let mut state = image_state();
        assert!(on_file_selected(&mut state, None).is_empty());
        assert!(state.status.error().is_some());
        assert_eq!(state.generation, 0);
    }

    #[test]
    fn oversized_image_is_rejected_locally() {
        let mut state = image_state();
        state.settings.max_upload_bytes = 4;
        let big = SelectedFile::new("big.png", "image/png", vec![0; 5]);

        assert!(on_file_selected(&mut state, Some(big)).is_empty());
        assert_eq!(state.status.error(), Some("Image is too large (max 1 KB)"));
    }

    #[test]
    fn valid_drop_dispatches_upload() {
        let mut state = image_state();
        state.input = "/tmp/cat.jpg".to_string();
        let jpg = SelectedFile::new("cat.jpg", "image/jpeg", vec![0xff, 0xd8]);

        let actions = handle_drop(&mut state, DragEvent::Drop(Some(jpg)));

        assert!(matches!(actions.first(), Some(Action::WebRequest(_))));
        assert!(state.input.is_empty());
        assert!(state.outcome.is_pending());
    }

    #[test]
    fn leave_clears_indicator_and_path() {
        let mut state = image_state();
        state.input = "/tmp/ca".to_string();
        handle_drop(&mut state, DragEvent::Over);
        handle_drop(&mut state, DragEvent::Leave);
        assert!(!state.drop_active);
        assert!(state.input.is_empty());
    }

    #[test]
    fn file_input_switches_to_image_mode() {
        let mut state = SearchState::default();
        let jpg = SelectedFile::new("cat.jpg", "image/jpeg", vec![0xff, 0xd8]);
        let actions = handle_file_input(&mut state, Some(jpg));
        assert_eq!(state.mode, SearchMode::Image);
        assert!(!actions.is_empty());
    }

    #[test]
    fn rejected_file_input_keeps_text_mode_and_results() {
        let mut state = SearchState::default();
        state.outcome = SearchOutcome::Success(vec![ResultDescriptor::new("a.jpg")]);
        let notes = SelectedFile::new("notes.txt", "text/plain", b"hello".to_vec());

        let actions = handle_file_input(&mut state, Some(notes));

        assert!(actions.is_empty());
        assert_eq!(state.mode, SearchMode::Text);
        assert_eq!(state.generation, 0);
        assert_eq!(
            state.outcome,
            SearchOutcome::Success(vec![ResultDescriptor::new("a.jpg")])
        );
        assert!(state.status.error().is_some());
    }
}
