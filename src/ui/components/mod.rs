//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title and mode tabs
//! - [`input`]: Query line / image drop zone
//! - [`preview`]: The image the results were searched for
//! - [`status`]: Loading, error and empty indicator
//! - [`grid`]: Result image cells
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Title]
//! [Tabs]
//! [Border]
//! [Input box - 3 lines]
//! [Preview - only with an upload]
//! [Status line]
//! [Grid rows - 4 lines each]
//! [+N more]
//! [Border]
//! [Footer]
//! ```

mod footer;
mod grid;
mod header;
mod input;
mod preview;
mod status;

pub use grid::BROKEN_IMAGE_TEXT;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use footer::render_footer;
use grid::{render_grid, render_overflow};
use header::render_header;
use input::render_input;
use preview::render_preview;
use status::render_status;

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full plugin layout.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_input(current_row, &vm.input, theme, cols);
    if let Some(preview) = &vm.preview {
        current_row = render_preview(current_row, preview, theme, cols);
    }
    current_row = render_status(current_row, vm.status.as_ref(), theme, cols);
    current_row = render_grid(current_row, &vm.grid, theme);

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    if current_row < border_row {
        render_overflow(current_row, vm.grid.hidden_count, theme, cols);
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}
