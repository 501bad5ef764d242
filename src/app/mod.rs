//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the domain/client layers.
//! Everything here is pure: network and timers are requested as [`Action`]s
//! and their results come back as [`Event`]s.
//!
//! ```text
//! Keys / pipes → Event → handle_event → SearchState mutations → Actions
//!                  ↑                                                ↓
//!                  └──────── web request results, timers ──────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and dispatch
//! - [`modes`]: Search modes and the mode switch
//! - [`orchestrator`]: Request dispatch, response routing, superseding
//! - [`state`]: Search state container and view model computation
//! - [`status`]: The loading / error / empty indicator
//! - [`upload`]: File input and drag-and-drop handling

pub mod actions;
pub mod handler;
pub mod modes;
pub mod orchestrator;
pub mod state;
pub mod status;
pub mod upload;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::SearchMode;
pub use state::{SearchSettings, SearchState};
pub use status::{StatusIndicator, StatusSurface};
pub use upload::DragEvent;
