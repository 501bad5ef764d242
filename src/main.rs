//! Zellij plugin wrapper and entry point.
//!
//! This is the only place that talks to the Zellij runtime. It translates
//! runtime events into library [`Event`]s, feeds them to [`handle_event`],
//! and carries out the returned [`Action`]s: web requests, timers and
//! hiding the pane.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, build the `SearchState`
//! 2. **Permissions**: Request web access and host filesystem access
//! 3. **Subscribe**: Key, `WebRequestResult`, `Timer`, `PermissionRequestResult`
//! 4. **Update**: Map events, delegate to the library, run actions
//! 5. **Pipe**: `search_image` messages start an image search
//! 6. **Render**: Call the library render function
//!
//! # Keybindings
//!
//! - `Tab`: Switch between text and image search
//! - `F1` / `F2`: Text / image search
//! - `Enter`: Search (text mode) or drop the typed path (image mode)
//! - `Esc`: Cancel the drop, clear the input, or close the plugin
//! - `Ctrl+c`: Close the plugin
//!
//! # Pipe
//!
//! ```sh
//! zellij pipe --name search_image -- ~/Pictures/cat.jpg
//! ```

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use lensdrop::app::DragEvent;
use lensdrop::client::HttpMethod;
use lensdrop::infrastructure::{read_selected_file, strip_host_prefix};
use lensdrop::{handle_event, Action, Config, Event, SearchMode, SearchState};

register_plugin!(State);

/// Name of the pipe that carries image paths into the plugin.
const SEARCH_IMAGE_PIPE: &str = "search_image";

const PERMISSIONS: [PermissionType; 2] = [PermissionType::WebAccess, PermissionType::FullHdAccess];

/// Plugin state wrapper around the library's `SearchState`.
struct State {
    search: SearchState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            search: lensdrop::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        lensdrop::observability::init_tracing(&config);

        let _span = tracing::debug_span!("plugin_load").entered();
        tracing::debug!(backend_url = %config.backend_url, "parsed configuration");

        self.search = lensdrop::initialize(&config);

        request_permission(&PERMISSIONS);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);
    }

    /// Returns `true` if the plugin UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                Event::WebResponse {
                    status,
                    body,
                    context,
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::Timer,
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                let granted = match status {
                    PermissionStatus::Granted => PERMISSIONS.to_vec(),
                    PermissionStatus::Denied => {
                        tracing::warn!("permissions denied - searches and uploads will fail");
                        Vec::new()
                    }
                };
                Event::PermissionsResult { granted }
            }
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    fn pipe(&mut self, pipe_message: PipeMessage) -> bool {
        if pipe_message.name != SEARCH_IMAGE_PIPE {
            tracing::debug!(name = %pipe_message.name, "ignoring pipe message");
            return false;
        }

        let file = pipe_message
            .payload
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .and_then(read_file);

        self.dispatch(&Event::FileInput(file))
    }

    fn render(&mut self, rows: usize, cols: usize) {
        lensdrop::ui::render(&self.search, rows, cols);
    }
}

impl State {
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.search, event) {
            Ok((should_render, actions)) => {
                for action in &actions {
                    execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return (key.bare_key == BareKey::Char('c')).then_some(Event::CloseFocus);
        }

        Some(match key.bare_key {
            BareKey::Tab => Event::ToggleMode,
            BareKey::F(1) => Event::SelectMode(SearchMode::Text),
            BareKey::F(2) => Event::SelectMode(SearchMode::Image),
            BareKey::Enter if self.search.mode == SearchMode::Image => {
                if self.search.input.trim().is_empty() {
                    return None;
                }
                Event::Drag(DragEvent::Drop(read_file(&self.search.input)))
            }
            BareKey::Enter => Event::Submit,
            BareKey::Esc => Event::Escape,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }
}

/// Reads a dropped or piped path. Unreadable files drop as `None` and are
/// reported by validation.
fn read_file(raw_path: &str) -> Option<lensdrop::domain::SelectedFile> {
    read_selected_file(raw_path)
        .map_err(|e| {
            tracing::info!(path = %strip_host_prefix(raw_path), error = %e, "could not read dropped file");
        })
        .ok()
}

#[tracing::instrument(level = "debug", skip_all)]
fn execute_action(action: &Action) {
    match action {
        Action::CloseFocus => hide_self(),
        Action::SetTimeout(secs) => set_timeout(*secs),
        Action::WebRequest(request) => {
            tracing::debug!(method = ?request.method, url = %request.url, "issuing web request");
            let verb = match request.method {
                HttpMethod::Get => HttpVerb::Get,
                HttpMethod::Post => HttpVerb::Post,
            };
            web_request(
                request.url.clone(),
                verb,
                request.headers.clone(),
                request.body.clone(),
                request.context.to_map(),
            );
        }
    }
}
