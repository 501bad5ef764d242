//! Shared rendering utilities.
//!
//! Cursor positioning and width handling used across the UI components.
//! Widths are counted in `char`s, which matches the terminal for the ASCII
//! and Latin paths the backend serves.

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H` to move the cursor.
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Shortens `text` to at most `max_width` characters, ending in `...` when
/// anything was cut.
///
/// ```
/// use lensdrop::ui::helpers::truncate;
///
/// assert_eq!(truncate("static/img/cat1.jpg", 10), "static/...");
/// assert_eq!(truncate("cat.jpg", 10), "cat.jpg");
/// ```
#[must_use]
pub fn truncate(text: &str, max_width: usize) -> String {
    let len = text.chars().count();
    if len <= max_width {
        return text.to_string();
    }
    if max_width <= 3 {
        return text.chars().take(max_width).collect();
    }
    let kept: String = text.chars().take(max_width - 3).collect();
    format!("{kept}...")
}

/// Number of terminal columns `text` occupies.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Left padding that centers `width` columns of content in `cols`.
#[must_use]
pub const fn center_padding(width: usize, cols: usize) -> usize {
    cols.saturating_sub(width) / 2
}
