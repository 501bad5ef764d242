//! Header component renderer.
//!
//! Renders the centered title and, on the line below, the mode tabs.

use crate::ui::helpers::{center_padding, display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{HeaderInfo, TabInfo};

/// Renders the title bar and the tab strip starting at `row`.
///
/// # Returns
///
/// The next available row position (row + 2)
///
/// # Layout
///
/// ```text
/// [padding] TITLE [padding]
/// [padding] [ Text Search ]  Image Search [padding]
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = display_width(&header.title);
    let padding = center_padding(title_len, cols);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));
    print!("{}", Theme::reset());

    render_tabs(row + 1, &header.tabs, theme, cols);
    row + 2
}

fn render_tabs(row: usize, tabs: &[TabInfo], theme: &Theme, cols: usize) {
    let labels: Vec<String> = tabs.iter().map(|tab| format!(" {} ", tab.label)).collect();
    let strip_width: usize = labels.iter().map(|l| display_width(l)).sum::<usize>()
        + tabs.len().saturating_sub(1) * 2;
    let padding = center_padding(strip_width, cols);

    position_cursor(row, 1);
    print!("{}", " ".repeat(padding));
    for (index, (tab, label)) in tabs.iter().zip(&labels).enumerate() {
        if index > 0 {
            print!("  ");
        }
        if tab.is_active {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.tab_active_fg));
            print!("{}", Theme::bg(&theme.colors.tab_active_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.tab_inactive_fg));
        }
        print!("{label}");
        print!("{}", Theme::reset());
    }
    print!("{}", " ".repeat(cols.saturating_sub(padding + strip_width)));
}
