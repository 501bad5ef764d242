//! Search state and view model computation.
//!
//! [`SearchState`] is the single owned container for everything the plugin
//! displays: active mode, live outcome, upload preview, status indicator and
//! the input buffer. It also carries the request generation counter that
//! decides whether an arriving response may still touch the UI.
//!
//! Only the event handler and the functions it delegates to (mode switch,
//! upload handler, search orchestrator) mutate it. The renderer reads a
//! snapshot through [`SearchState::compute_viewmodel`].
//!
//! # Example
//!
//! ```rust
//! use lensdrop::app::SearchState;
//!
//! let state = SearchState::default();
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.grid.cells.is_empty());
//! assert!(viewmodel.status.is_none());
//! ```

use super::modes::SearchMode;
use super::status::{StatusIndicator, StatusSurface, NO_RESULTS_MESSAGE};
use crate::domain::{ImageLoadState, SearchKind, SearchOutcome, UploadPreview};
use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::urls::{display_url, file_label};
use crate::ui::viewmodel::{
    FooterInfo, GridCell, GridInfo, HeaderInfo, InputInfo, PreviewInfo, StatusInfo, StatusKind,
    TabInfo, UIViewModel,
};
use std::collections::VecDeque;

/// Lines taken by one grid cell (top border, label, source, bottom border).
const CELL_HEIGHT: usize = 4;

/// Lines taken by everything except the grid and the preview line: blank
/// line, title, tabs, border, 3-line input box, spacer, footer border, footer.
const CHROME_ROWS: usize = 10;

/// Runtime settings the search flow depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    /// Backend base URL without a trailing `/`.
    pub backend_url: String,

    /// Seconds before a pending request fails; `None` disables the timer.
    pub request_timeout_secs: Option<u64>,

    /// Largest accepted upload in bytes.
    pub max_upload_bytes: u64,

    /// Width of one grid cell in terminal columns.
    pub cell_width: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:5000".to_string(),
            request_timeout_secs: Some(30),
            max_upload_bytes: 16 * 1024 * 1024,
            cell_width: 28,
        }
    }
}

/// Central search state container.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Active search mode.
    pub mode: SearchMode,

    /// Live outcome. Only a response of the current generation changes it.
    pub outcome: SearchOutcome,

    /// Image the current results were searched for.
    pub preview: Option<UploadPreview>,

    /// Loading / error / empty indicator.
    pub status: StatusSurface,

    /// Generation of the most recent dispatch or mode switch.
    ///
    /// Strictly increasing. A response whose context carries any other value
    /// is stale and dropped.
    pub generation: u64,

    /// Kind of the request that is currently pending, if any.
    pub pending_kind: Option<SearchKind>,

    /// Generations of armed timeout timers, oldest first.
    ///
    /// The runtime fires timers in arming order and does not say which one
    /// fired, so each `Timer` event pops the front entry.
    pub armed_timers: VecDeque<u64>,

    /// Query text (text mode) or file path (image mode) being typed.
    pub input: String,

    /// Whether a drag is currently hovering the drop zone.
    pub drop_active: bool,

    /// Load state per result, indexed like `outcome.descriptors()`.
    pub image_states: Vec<ImageLoadState>,

    pub settings: SearchSettings,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl SearchState {
    #[must_use]
    pub fn new(settings: SearchSettings, theme: Theme) -> Self {
        Self {
            settings,
            theme,
            ..Self::default()
        }
    }

    /// Invalidates every request issued so far and returns the new generation.
    pub fn invalidate_in_flight(&mut self) -> u64 {
        self.generation += 1;
        self.pending_kind = None;
        self.generation
    }

    /// Whether `generation` is the one the UI currently belongs to.
    #[must_use]
    pub const fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Computes a renderable UI view model from current state and terminal
    /// dimensions.
    ///
    /// The grid is rebuilt from the outcome on every call and is only
    /// populated while no status indicator is showing.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", rows, cols).entered();

        let preview = self.compute_preview(cols);
        let status = self.compute_status();

        let grid = if status.is_none() {
            self.compute_grid(rows, cols, preview.is_some())
        } else {
            GridInfo {
                columns: self.grid_columns(cols),
                cell_width: self.settings.cell_width,
                ..GridInfo::default()
            }
        };

        UIViewModel {
            header: self.compute_header(),
            input: self.compute_input(),
            preview,
            status,
            grid,
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let tabs = [SearchMode::Text, SearchMode::Image]
            .into_iter()
            .map(|mode| TabInfo {
                label: mode.label().to_string(),
                is_active: mode == self.mode,
            })
            .collect();

        HeaderInfo {
            title: " Image Search ".to_string(),
            tabs,
        }
    }

    fn compute_input(&self) -> InputInfo {
        let (label, placeholder) = match self.mode {
            SearchMode::Text => ("Search", "Type a description and press Enter"),
            SearchMode::Image => ("Image path", "Drop or paste an image path here"),
        };

        InputInfo {
            label: label.to_string(),
            text: self.input.clone(),
            placeholder: placeholder.to_string(),
            is_drop_active: self.mode == SearchMode::Image && self.drop_active,
        }
    }

    fn compute_preview(&self, cols: usize) -> Option<PreviewInfo> {
        let (caption, source) = match self.preview.as_ref()? {
            UploadPreview::Local { name } => ("Uploading:", name.clone()),
            UploadPreview::Echoed { path } => ("Searching similar to:", display_url(path)),
        };

        let max_source = cols.saturating_sub(caption.len() + 3);
        Some(PreviewInfo {
            caption: caption.to_string(),
            source: truncate(&source, max_source),
        })
    }

    fn compute_status(&self) -> Option<StatusInfo> {
        match self.status.indicator() {
            StatusIndicator::None => None,
            StatusIndicator::Loading => Some(StatusInfo {
                kind: StatusKind::Loading,
                message: "Searching...".to_string(),
            }),
            StatusIndicator::Error(message) => Some(StatusInfo {
                kind: StatusKind::Error,
                message: message.clone(),
            }),
            StatusIndicator::Empty => Some(StatusInfo {
                kind: StatusKind::Empty,
                message: NO_RESULTS_MESSAGE.to_string(),
            }),
        }
    }

    fn grid_columns(&self, cols: usize) -> usize {
        (cols / self.settings.cell_width.max(1)).max(1)
    }

    fn compute_grid(&self, rows: usize, cols: usize, has_preview: bool) -> GridInfo {
        let columns = self.grid_columns(cols);
        let cell_width = self.settings.cell_width;
        let descriptors = self.outcome.descriptors();

        let chrome = CHROME_ROWS + usize::from(has_preview);
        let grid_rows = (rows.saturating_sub(chrome) / CELL_HEIGHT).max(1);
        let capacity = grid_rows * columns;

        // Two columns of border plus one space on each side.
        let inner_width = cell_width.saturating_sub(4);

        let cells: Vec<GridCell> = descriptors
            .iter()
            .take(capacity)
            .enumerate()
            .map(|(index, descriptor)| {
                let src = display_url(&descriptor.path);
                GridCell {
                    label: truncate(file_label(&src), inner_width),
                    src,
                    state: self.image_states.get(index).copied().unwrap_or_default(),
                }
            })
            .collect();

        GridInfo {
            columns,
            cell_width,
            hidden_count: descriptors.len().saturating_sub(cells.len()),
            cells,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.mode {
            SearchMode::Text => "Tab: image search  Enter: search  Esc: clear / close",
            SearchMode::Image => {
                "Tab: text search  Type or paste a path  Enter: upload  Esc: cancel / close"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ResultDescriptor;

    fn with_results(paths: &[&str]) -> SearchState {
        let mut state = SearchState::default();
        state.outcome = SearchOutcome::Success(paths.iter().map(|p| ResultDescriptor::new(*p)).collect());
        state.image_states = vec![ImageLoadState::Deferred; paths.len()];
        state
    }

    #[test]
    fn success_renders_one_cell_per_result() {
        let state = with_results(&["static/img/cat1.jpg", "https://cdn.example/dog.png"]);
        let vm = state.compute_viewmodel(40, 120);

        let sources: Vec<&str> = vm.grid.cells.iter().map(|c| c.src.as_str()).collect();
        assert_eq!(sources, vec!["/static/img/cat1.jpg", "https://cdn.example/dog.png"]);
        assert_eq!(vm.grid.cells[0].label, "cat1.jpg");
        assert_eq!(vm.grid.hidden_count, 0);
    }

    #[test]
    fn long_urls_reach_the_grid_unchanged() {
        let url = "https://images.example.org/collections/2024/very-long-name.webp";
        let state = with_results(&[url]);
        let vm = state.compute_viewmodel(40, 120);

        assert_eq!(vm.grid.cells[0].src, url);
        assert!(vm.grid.cells[0].label.len() <= state.settings.cell_width - 4);
    }

    #[test]
    fn status_hides_the_grid() {
        let mut state = with_results(&["a.jpg"]);
        state.status.set_error(Some("Please upload an image file (JPEG, PNG, GIF)".to_string()));

        let vm = state.compute_viewmodel(40, 120);
        assert!(vm.grid.cells.is_empty());
        assert_eq!(vm.status.map(|s| s.kind), Some(StatusKind::Error));
    }

    #[test]
    fn columns_follow_cell_width() {
        let state = with_results(&["a.jpg"]);
        assert_eq!(state.compute_viewmodel(40, 120).grid.columns, 4);
        assert_eq!(state.compute_viewmodel(40, 10).grid.columns, 1);
    }

    #[test]
    fn results_beyond_the_screen_are_counted() {
        let paths: Vec<String> = (0..50).map(|i| format!("img/{i}.jpg")).collect();
        let refs: Vec<&str> = paths.iter().map(String::as_str).collect();
        let state = with_results(&refs);

        let vm = state.compute_viewmodel(24, 56);
        assert_eq!(vm.grid.columns, 2);
        assert_eq!(vm.grid.cells.len() + vm.grid.hidden_count, 50);
        assert!(vm.grid.hidden_count > 0);
    }

    #[test]
    fn echoed_preview_uses_display_url() {
        let mut state = SearchState::default();
        state.preview = Some(UploadPreview::Echoed {
            path: "uploads/u1.jpg".to_string(),
        });
        let preview = state.compute_viewmodel(40, 120).preview;
        assert_eq!(preview.map(|p| p.source).as_deref(), Some("/uploads/u1.jpg"));
    }

    #[test]
    fn active_tab_tracks_mode() {
        let mut state = SearchState::default();
        state.mode = SearchMode::Image;
        let tabs = state.compute_viewmodel(24, 80).header.tabs;
        assert!(!tabs[0].is_active);
        assert!(tabs[1].is_active);
    }

    #[test]
    fn invalidation_bumps_generation_and_clears_pending() {
        let mut state = SearchState::default();
        state.pending_kind = Some(SearchKind::Text);
        let next = state.invalidate_in_flight();
        assert_eq!(next, 1);
        assert!(state.is_current(1));
        assert!(!state.is_current(0));
        assert!(state.pending_kind.is_none());
    }
}
