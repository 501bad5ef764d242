//! Infrastructure layer for filesystem and environment interactions.
//!
//! Works with the Zellij plugin sandbox, where the host folder is mounted
//! under `/host`.

pub mod files;
pub mod paths;

pub use files::{mime_type_for, read_selected_file};
pub use paths::{
    expand_tilde, get_data_dir, normalize_dropped_path, resolve_host_path, strip_host_prefix,
};
