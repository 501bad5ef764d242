//! User interface rendering layer with component-based architecture.
//!
//! ```text
//! SearchState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Cursor and width utilities
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation
//! - [`urls`]: Display URL normalization for result paths

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod urls;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    FooterInfo, GridCell, GridInfo, HeaderInfo, InputInfo, PreviewInfo, StatusInfo, StatusKind,
    TabInfo, UIViewModel,
};
