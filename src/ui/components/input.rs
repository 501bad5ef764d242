//! Input box component renderer.
//!
//! In text mode this is the query line. In image mode it is the drop zone: the
//! border switches color while a drag hovers it.

use crate::ui::helpers::{display_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::InputInfo;

/// Horizontal margin for the input box (spaces on left and right).
const INPUT_BOX_MARGIN: usize = 5;

/// Renders the 3-line input box at `row`.
///
/// # Returns
///
/// The next available row position (row + 3)
///
/// # Layout
///
/// ```text
/// [margin] ┌────────────────┐ [margin]
/// [margin] │ Search: cat▏   │ [margin]
/// [margin] └────────────────┘ [margin]
/// ```
///
/// When the buffer is long, its tail is shown so the cursor stays visible.
pub fn render_input(row: usize, input: &InputInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(INPUT_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if input.is_drop_active {
        &theme.colors.drop_active_border
    } else {
        &theme.colors.input_border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let prefix = format!(" {}: ", input.label);
    let room = inner_width.saturating_sub(display_width(&prefix) + 1);

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{prefix}");

    let shown = if input.text.is_empty() {
        print!("{}", Theme::fg(&theme.colors.text_dim));
        let placeholder = truncate(&input.placeholder, room);
        print!("{placeholder}");
        display_width(&placeholder)
    } else {
        let tail = tail_of(&input.text, room.saturating_sub(1));
        print!("{tail}▏");
        display_width(&tail) + 1
    };

    let padding = inner_width.saturating_sub(display_width(&prefix) + shown);
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}

/// Last `width` characters of `text`.
fn tail_of(text: &str, width: usize) -> String {
    let len = display_width(text);
    text.chars().skip(len.saturating_sub(width)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_paths_keep_their_end_visible() {
        assert_eq!(tail_of("/home/me/Pictures/cat.jpg", 7), "cat.jpg");
        assert_eq!(tail_of("cat", 10), "cat");
    }
}
