//! Upload preview line renderer.

use crate::ui::helpers::{display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PreviewInfo;

/// Renders `Caption source` at `row`, left-aligned under the input box.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_preview(row: usize, preview: &PreviewInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("  ");
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{} ", preview.caption);
    print!("{}", Theme::fg(&theme.colors.preview_fg));
    print!("{}", preview.source);

    let used = 2 + display_width(&preview.caption) + 1 + display_width(&preview.source);
    print!("{}", " ".repeat(cols.saturating_sub(used)));
    print!("{}", Theme::reset());
    row + 1
}
