//! Search orchestrator: dispatch, response routing and superseding.
//!
//! Every dispatch bumps the request generation and stamps it into the
//! request's context. When the runtime delivers the result, the generation in
//! the echoed context is compared with the current one; anything else is a
//! response to a superseded request and is dropped without touching state.
//!
//! ```text
//! search_by_text / search_by_image
//!     → generation += 1, outcome = Pending, status = loading
//!     → [WebRequest, SetTimeout?]
//! handle_response (current generation)
//!     → Success(results) + image probes | Failure(message)
//! handle_timer (oldest armed timer, still pending)
//!     → Failure("… request timed out after N seconds")
//! ```

use super::actions::Action;
use super::state::SearchState;
use crate::client::{
    decode_search_response, is_success, HttpRequest, RequestContext, RequestKind, TraceContext,
};
use crate::domain::{
    ImageLoadState, SearchError, SearchKind, SearchOutcome, SearchRequest, SelectedFile,
    UploadPreview,
};
use crate::ui::urls::{display_url, fetch_url};

/// Dispatches a text search.
///
/// A query that trims to empty is ignored: no request, no state change.
pub fn search_by_text(state: &mut SearchState, query: &str) -> Vec<Action> {
    let Some(SearchRequest::Text(query)) = SearchRequest::text(query) else {
        tracing::debug!("ignoring empty text query");
        return vec![];
    };

    state.preview = None;
    let generation = begin_request(state, SearchKind::Text);

    let _span = tracing::info_span!("search_by_text", generation, query_len = query.len()).entered();
    let context = RequestContext::new(generation, RequestKind::Search(SearchKind::Text));
    let request = HttpRequest::text_search(&state.settings.backend_url, &query, context);

    tracing::info!(url = %request.url, "dispatching text search");
    with_timeout(state, generation, request)
}

/// Dispatches an image search for an already validated file.
pub fn search_by_image(state: &mut SearchState, file: &SelectedFile) -> Vec<Action> {
    debug_assert!(file.is_image(), "image search dispatched for {}", file.mime_type);

    state.preview = Some(UploadPreview::Local {
        name: file.name.clone(),
    });
    let generation = begin_request(state, SearchKind::Image);

    let _span = tracing::info_span!(
        "search_by_image",
        generation,
        file_name = %file.name,
        mime_type = %file.mime_type,
        size = file.size()
    )
    .entered();
    let context = RequestContext::new(generation, RequestKind::Search(SearchKind::Image));
    let request = HttpRequest::image_search(&state.settings.backend_url, file, context);

    tracing::info!(url = %request.url, body_len = request.body.len(), "dispatching image search");
    with_timeout(state, generation, request)
}

/// Routes a web request result back into the search state.
///
/// Returns whether the UI needs re-rendering together with follow-up
/// actions (image probes after a successful search).
pub fn handle_response(
    state: &mut SearchState,
    status: u16,
    body: &[u8],
    context: &RequestContext,
) -> (bool, Vec<Action>) {
    let _context_guard = context.trace_context.as_ref().and_then(TraceContext::attach);
    let _span = tracing::debug_span!(
        "handle_response",
        generation = context.generation,
        kind = ?context.kind,
        status
    )
    .entered();

    if !state.is_current(context.generation) {
        tracing::debug!(current = state.generation, "discarding stale response");
        return (false, vec![]);
    }

    match context.kind {
        RequestKind::Search(kind) => handle_search_response(state, kind, status, body),
        RequestKind::Probe { index } => (handle_probe_response(state, index, status), vec![]),
    }
}

/// Handles the oldest armed timer firing.
///
/// Fails the live search if the timer belongs to it and it is still pending.
/// Returns whether the UI needs re-rendering.
pub fn handle_timer(state: &mut SearchState) -> bool {
    let Some(generation) = state.armed_timers.pop_front() else {
        tracing::trace!("timer fired with nothing armed");
        return false;
    };

    if !state.is_current(generation) || !state.outcome.is_pending() {
        tracing::trace!(generation, "timer for a settled request");
        return false;
    }

    let Some(kind) = state.pending_kind.take() else {
        return false;
    };

    let seconds = state.settings.request_timeout_secs.unwrap_or_default();
    tracing::warn!(generation, seconds, kind = ?kind, "search request timed out");
    fail(state, kind, &SearchError::Timeout(seconds));
    true
}

/// Puts the state into Pending for a new request and returns its generation.
fn begin_request(state: &mut SearchState, kind: SearchKind) -> u64 {
    let generation = state.invalidate_in_flight();
    state.pending_kind = Some(kind);
    state.outcome = SearchOutcome::Pending;
    state.image_states.clear();
    state.status.set_loading(true);
    generation
}

fn with_timeout(state: &mut SearchState, generation: u64, request: HttpRequest) -> Vec<Action> {
    let mut actions = vec![Action::WebRequest(request)];
    if let Some(seconds) = state.settings.request_timeout_secs {
        state.armed_timers.push_back(generation);
        #[allow(clippy::cast_precision_loss)]
        actions.push(Action::SetTimeout(seconds as f64));
    }
    actions
}

fn handle_search_response(
    state: &mut SearchState,
    kind: SearchKind,
    status: u16,
    body: &[u8],
) -> (bool, Vec<Action>) {
    if state.pending_kind != Some(kind) {
        tracing::debug!(pending = ?state.pending_kind, "response for a request that already settled");
        return (false, vec![]);
    }
    state.pending_kind = None;
    state.status.clear();

    match decode_search_response(kind, status, body) {
        Ok(response) => {
            match response.uploaded_image {
                Some(path) if kind == SearchKind::Image => {
                    state.preview = Some(UploadPreview::Echoed { path });
                }
                Some(path) => tracing::debug!(%path, "ignoring uploaded_image on a text search"),
                None => {}
            }

            tracing::info!(result_count = response.results.len(), "search succeeded");

            if response.results.is_empty() {
                state.outcome = SearchOutcome::Success(vec![]);
                state.image_states.clear();
                state.status.set_empty(true);
                return (true, vec![]);
            }

            state.image_states = vec![ImageLoadState::Deferred; response.results.len()];
            state.outcome = SearchOutcome::Success(response.results);
            (true, probe_images(state))
        }
        Err(err) => {
            tracing::warn!(error = %err, kind = ?kind, "search failed");
            fail(state, kind, &err);
            (true, vec![])
        }
    }
}

fn handle_probe_response(state: &mut SearchState, index: usize, status: u16) -> bool {
    let Some(cell) = state.image_states.get_mut(index) else {
        tracing::debug!(index, "probe for a cell that no longer exists");
        return false;
    };

    let next = if is_success(status) {
        ImageLoadState::Loaded
    } else {
        ImageLoadState::Broken
    };

    if next == ImageLoadState::Broken {
        tracing::debug!(index, status, "result image could not be loaded");
    }

    let changed = *cell != next;
    *cell = next;
    changed
}

/// Emits one load check per result image.
///
/// Inline images have nothing to fetch and are marked loaded directly.
fn probe_images(state: &mut SearchState) -> Vec<Action> {
    let generation = state.generation;
    let backend_url = state.settings.backend_url.clone();
    let urls: Vec<Option<String>> = state
        .outcome
        .descriptors()
        .iter()
        .map(|descriptor| fetch_url(&backend_url, &display_url(&descriptor.path)))
        .collect();

    let mut actions = Vec::with_capacity(urls.len());
    for (index, url) in urls.into_iter().enumerate() {
        match url {
            Some(url) => {
                let context = RequestContext::new(generation, RequestKind::Probe { index });
                actions.push(Action::WebRequest(HttpRequest::image_probe(url, context)));
            }
            None => {
                if let Some(cell) = state.image_states.get_mut(index) {
                    *cell = ImageLoadState::Loaded;
                }
            }
        }
    }

    tracing::debug!(probes = actions.len(), "deferred image probes issued");
    actions
}

/// Records a failed search: the grid empties and the message is shown.
///
/// A local "Uploading" preview goes too; an echoed one stays.
fn fail(state: &mut SearchState, kind: SearchKind, err: &SearchError) {
    let message = err.user_message(kind);
    if matches!(state.preview, Some(UploadPreview::Local { .. })) {
        state.preview = None;
    }
    state.image_states.clear();
    state.status.set_error(Some(message.clone()));
    state.outcome = SearchOutcome::Failure(message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::HttpMethod;
    use crate::domain::ResultDescriptor;

    fn only_request(actions: &[Action]) -> &HttpRequest {
        let requests: Vec<&HttpRequest> = actions
            .iter()
            .filter_map(|a| match a {
                Action::WebRequest(r) => Some(r),
                _ => None,
            })
            .collect();
        assert_eq!(requests.len(), 1, "{actions:?}");
        requests[0]
    }

    fn jpeg() -> SelectedFile {
        SelectedFile::new("cat.jpg", "image/jpeg", vec![0xff, 0xd8, 0xff])
    }

    #[test]
    fn text_dispatch_goes_pending_and_arms_timer() {
        let mut state = SearchState::default();
        let actions = search_by_text(&mut state, "  cat ");

        let request = only_request(&actions);
        assert_eq!(request.method, HttpMethod::Get);
        assert!(request.url.ends_with("/search?search_query=cat"));
        assert!(actions.contains(&Action::SetTimeout(30.0)));
        assert_eq!(state.outcome, SearchOutcome::Pending);
        assert!(state.status.is_loading());
        assert_eq!(state.armed_timers.len(), 1);
    }

    #[test]
    fn whitespace_query_changes_nothing() {
        let mut state = SearchState::default();
        state.outcome = SearchOutcome::Success(vec![ResultDescriptor::new("a.jpg")]);
        let before = state.outcome.clone();

        assert!(search_by_text(&mut state, " \t ").is_empty());
        assert_eq!(state.outcome, before);
        assert_eq!(state.generation, 0);
    }

    #[test]
    fn disabled_timeout_arms_nothing() {
        let mut state = SearchState::default();
        state.settings.request_timeout_secs = None;
        let actions = search_by_text(&mut state, "cat");
        assert_eq!(actions.len(), 1);
        assert!(state.armed_timers.is_empty());
    }

    #[test]
    fn image_dispatch_shows_local_preview() {
        let mut state = SearchState::default();
        let actions = search_by_image(&mut state, &jpeg());
        assert_eq!(only_request(&actions).method, HttpMethod::Post);
        assert_eq!(
            state.preview,
            Some(UploadPreview::Local {
                name: "cat.jpg".to_string()
            })
        );
    }

    #[test]
    fn success_issues_one_probe_per_fetchable_image() {
        let mut state = SearchState::default();
        search_by_text(&mut state, "cat");
        let context = RequestContext::new(state.generation, RequestKind::Search(SearchKind::Text));

        let body = br#"{"results":[{"path":"static/img/cat1.jpg"},{"path":"data:image/png;base64,AA"}]}"#;
        let (render, actions) = handle_response(&mut state, 200, body, &context);

        assert!(render);
        assert!(state.status.is_none());
        assert_eq!(
            only_request(&actions).url,
            "http://localhost:5000/static/img/cat1.jpg"
        );
        assert_eq!(
            state.image_states,
            vec![ImageLoadState::Deferred, ImageLoadState::Loaded]
        );
    }

    #[test]
    fn failed_probe_marks_cell_broken_without_removing_it() {
        let mut state = SearchState::default();
        search_by_text(&mut state, "cat");
        let generation = state.generation;
        let search = RequestContext::new(generation, RequestKind::Search(SearchKind::Text));
        handle_response(&mut state, 200, br#"[{"path":"a.jpg"},{"path":"b.jpg"}]"#, &search);

        let probe = RequestContext::new(generation, RequestKind::Probe { index: 1 });
        let (render, _) = handle_response(&mut state, 404, b"", &probe);

        assert!(render);
        assert_eq!(state.outcome.descriptors().len(), 2);
        assert_eq!(state.image_states[1], ImageLoadState::Broken);
    }

    #[test]
    fn failure_message_is_prefixed_by_kind() {
        let mut state = SearchState::default();
        search_by_image(&mut state, &jpeg());
        let context = RequestContext::new(state.generation, RequestKind::Search(SearchKind::Image));

        handle_response(&mut state, 400, br#"{"error":"No file part"}"#, &context);

        let expected = "Error processing image: server returned HTTP 400: No file part";
        assert_eq!(state.status.error(), Some(expected));
        assert_eq!(state.outcome, SearchOutcome::Failure(expected.to_string()));
    }

    #[test]
    fn older_response_never_overwrites_newer() {
        let mut state = SearchState::default();
        search_by_text(&mut state, "first");
        let first = RequestContext::new(state.generation, RequestKind::Search(SearchKind::Text));
        search_by_text(&mut state, "second");
        let second = RequestContext::new(state.generation, RequestKind::Search(SearchKind::Text));

        handle_response(&mut state, 200, br#"[{"path":"second.jpg"}]"#, &second);
        let (render, actions) = handle_response(&mut state, 200, br#"[{"path":"first.jpg"}]"#, &first);

        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(
            state.outcome,
            SearchOutcome::Success(vec![ResultDescriptor::new("second.jpg")])
        );
    }

    #[test]
    fn timer_fails_pending_request_and_late_response_is_dropped() {
        let mut state = SearchState::default();
        search_by_text(&mut state, "cat");
        let context = RequestContext::new(state.generation, RequestKind::Search(SearchKind::Text));

        assert!(handle_timer(&mut state));
        assert_eq!(
            state.status.error(),
            Some("Error performing search: request timed out after 30 seconds")
        );

        let (render, _) = handle_response(&mut state, 200, br#"[{"path":"a.jpg"}]"#, &context);
        assert!(!render);
        assert!(matches!(state.outcome, SearchOutcome::Failure(_)));
    }

    #[test]
    fn timers_of_superseded_requests_are_ignored() {
        let mut state = SearchState::default();
        search_by_text(&mut state, "first");
        search_by_text(&mut state, "second");

        // First timer belongs to the superseded request.
        assert!(!handle_timer(&mut state));
        assert!(state.outcome.is_pending());
        assert!(handle_timer(&mut state));
        assert!(!handle_timer(&mut state));
    }
    #[test]
    fn settling_replaces_an_error_shown_mid_flight() {
        let mut state = SearchState::default();
        search_by_image(&mut state, &jpeg());
        let context = RequestContext::new(state.generation, RequestKind::Search(SearchKind::Image));
        state.status.set_error(Some("Please upload an image file (JPEG, PNG, GIF)".to_string()));

        handle_response(&mut state, 200, br#"{"results":[{"path":"a.jpg"}]}"#, &context);

        assert!(state.status.is_none());
        assert_eq!(state.compute_viewmodel(40, 120).grid.cells.len(), 1);
    }

    #[test]
    fn text_search_ignores_uploaded_image() {
        let mut state = SearchState::default();
        search_by_text(&mut state, "cat");
        let context = RequestContext::new(state.generation, RequestKind::Search(SearchKind::Text));

        handle_response(
            &mut state,
            200,
            br#"{"uploaded_image":"uploads/x.jpg","results":[]}"#,
            &context,
        );

        assert_eq!(state.preview, None);
        assert_eq!(state.outcome, SearchOutcome::Success(vec![]));
    }

    #[test]
    fn failed_upload_drops_the_uploading_preview() {
        let mut state = SearchState::default();
        search_by_image(&mut state, &jpeg());
        let context = RequestContext::new(state.generation, RequestKind::Search(SearchKind::Image));

        handle_response(&mut state, 500, b"", &context);

        assert_eq!(state.preview, None);
        assert!(state.compute_viewmodel(40, 120).preview.is_none());
    }
}
