//! View model types representing renderable UI state.
//!
//! View models are computed from a [`SearchState`](crate::app::SearchState)
//! snapshot by `compute_viewmodel()` and consumed by the renderer. They carry
//! no behavior, only display-ready data: normalized image URLs, truncated
//! labels and the single status line.
//!
//! The status line and the result grid are mutually exclusive. Whenever
//! `status` is `Some`, `grid.cells` is empty.

use crate::domain::ImageLoadState;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Title and mode tabs.
    pub header: HeaderInfo,

    /// Query line (text mode) or drop zone (image mode).
    pub input: InputInfo,

    /// The image the current results were searched for.
    pub preview: Option<PreviewInfo>,

    /// Loading, error or empty indicator.
    pub status: Option<StatusInfo>,

    /// Result cells laid out in rows of `grid.columns`.
    pub grid: GridInfo,

    /// Keybinding hints.
    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,

    /// One tab per search mode, in fixed order.
    pub tabs: Vec<TabInfo>,
}

/// A mode tab in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub label: String,
    pub is_active: bool,
}

/// Input box display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputInfo {
    /// Label in front of the buffer ("Search" or "Image path").
    pub label: String,

    /// Current buffer contents.
    pub text: String,

    /// Hint shown while the buffer is empty.
    pub placeholder: String,

    /// Whether a drag is hovering the drop zone.
    pub is_drop_active: bool,
}

/// Preview line display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewInfo {
    pub caption: String,

    /// Display URL of an echoed upload, or the local file name.
    pub source: String,
}

/// Which indicator the status line shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Loading,
    Error,
    Empty,
}

/// Status line display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub kind: StatusKind,
    pub message: String,
}

/// Result grid display information.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridInfo {
    /// Cells per grid row, at least 1.
    pub columns: usize,

    /// Width of one cell in terminal columns.
    pub cell_width: usize,

    /// Cells that fit on screen, in result order.
    pub cells: Vec<GridCell>,

    /// Results that did not fit.
    pub hidden_count: usize,
}

/// One result image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    /// Normalized display URL, in full. The grid clips it to the cell.
    pub src: String,

    /// Short name shown as the cell title.
    pub label: String,

    pub state: ImageLoadState,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}
