//! Result grid renderer.
//!
//! Lays cells out left to right, wrapping after `columns` cells. Every cell is
//! a framed box of fixed width:
//!
//! ```text
//! ┌──────────────────────────┐
//! │ cat1.jpg                 │
//! │ /static/img/cat1.jpg     │
//! └──────────────────────────┘
//! ```
//!
//! A broken image keeps its box; its body is painted with the placeholder
//! background and reads "Image not found".

use crate::domain::ImageLoadState;
use crate::ui::helpers::{center_padding, display_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{GridCell, GridInfo};

/// Text shown in place of an image that failed to load.
pub const BROKEN_IMAGE_TEXT: &str = "Image not found";

const CELL_HEIGHT: usize = 4;

/// Renders the grid starting at `row`.
///
/// # Returns
///
/// The row after the last rendered grid row.
pub fn render_grid(row: usize, grid: &GridInfo, theme: &Theme) -> usize {
    let columns = grid.columns.max(1);

    for (index, cell) in grid.cells.iter().enumerate() {
        let top = row + (index / columns) * CELL_HEIGHT;
        let left = 1 + (index % columns) * grid.cell_width;
        render_cell(top, left, grid.cell_width, cell, theme);
    }

    let used_rows = (grid.cells.len() + columns - 1) / columns;
    row + used_rows * CELL_HEIGHT
}

/// Renders the "+N more" line when results did not fit.
pub fn render_overflow(row: usize, hidden_count: usize, theme: &Theme, cols: usize) {
    if hidden_count == 0 {
        return;
    }
    let text = format!("+{hidden_count} more");
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(center_padding(display_width(&text), cols)));
    print!("{text}");
    print!("{}", Theme::reset());
}

fn render_cell(top: usize, left: usize, width: usize, cell: &GridCell, theme: &Theme) {
    let inner = width.saturating_sub(2);
    let content = width.saturating_sub(4);

    position_cursor(top, left);
    print!("{}", Theme::fg(&theme.colors.cell_border));
    print!("┌{}┐", "─".repeat(inner));
    print!("{}", Theme::reset());

    let body = match cell.state {
        ImageLoadState::Broken => [
            (cell.label.as_str(), Some(&theme.colors.broken_bg), &theme.colors.broken_fg, false),
            (BROKEN_IMAGE_TEXT, Some(&theme.colors.broken_bg), &theme.colors.broken_fg, true),
        ],
        ImageLoadState::Deferred => [
            (cell.label.as_str(), None, &theme.colors.text_normal, false),
            (cell.src.as_str(), None, &theme.colors.text_dim, false),
        ],
        ImageLoadState::Loaded => [
            (cell.label.as_str(), None, &theme.colors.text_normal, false),
            (cell.src.as_str(), None, &theme.colors.preview_fg, false),
        ],
    };

    for (offset, (text, bg, fg, centered)) in body.into_iter().enumerate() {
        position_cursor(top + 1 + offset, left);
        print!("{}", Theme::fg(&theme.colors.cell_border));
        print!("│");
        if let Some(bg) = bg {
            print!("{}", Theme::bg(bg));
        }
        print!("{}", Theme::fg(fg));

        let shown = truncate(text, content);
        let text_len = display_width(&shown);
        let lead = if centered { center_padding(text_len, content) } else { 0 };
        print!(" {}", " ".repeat(lead));
        print!("{shown}");
        print!("{} ", " ".repeat(content.saturating_sub(lead + text_len)));

        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.cell_border));
        print!("│");
        print!("{}", Theme::reset());
    }

    position_cursor(top + CELL_HEIGHT - 1, left);
    print!("{}", Theme::fg(&theme.colors.cell_border));
    print!("└{}┘", "─".repeat(inner));
    print!("{}", Theme::reset());
}
