//! Top-level rendering coordinator.
//!
//! Computes the view model from a [`SearchState`] snapshot and hands it to the
//! layout renderer. Output goes to stdout, which Zellij paints into the
//! plugin pane.

use crate::app::SearchState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// Does not clear the screen; every line of the layout is padded to the full
/// width instead.
pub fn render(state: &SearchState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_layout(&viewmodel, &state.theme, cols, rows);
}
