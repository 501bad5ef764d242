//! Status line component renderer.

use crate::ui::helpers::{center_padding, display_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{StatusInfo, StatusKind};

/// Renders the status line at `row`, or a blank line when nothing is shown.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_status(row: usize, status: Option<&StatusInfo>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let Some(status) = status else {
        print!("{}", " ".repeat(cols));
        return row + 1;
    };

    let (color, marker) = match status.kind {
        StatusKind::Loading => (&theme.colors.loading_fg, "⋯ "),
        StatusKind::Error => (&theme.colors.error_fg, "✗ "),
        StatusKind::Empty => (&theme.colors.empty_fg, ""),
    };

    let text = truncate(&format!("{marker}{}", status.message), cols);
    let text_len = display_width(&text);
    let padding = center_padding(text_len, cols);

    print!("{}", Theme::fg(color));
    if status.kind == StatusKind::Error {
        print!("{}", Theme::bold());
    }
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}
