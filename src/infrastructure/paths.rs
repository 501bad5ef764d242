//! Path handling for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host folder (normally the user's home directory) is
//! mounted under `/host`. Paths typed or pasted by the user are mapped onto
//! that mount before being read.

use std::path::PathBuf;

/// Returns the data directory used for trace output.
///
/// Resolves to `~/.local/share/zellij/lensdrop` on the host when Zellij was
/// started from the home directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("lensdrop")
}

/// Expands tilde paths to use the `/host` prefix for Zellij sandbox.
///
/// # Examples
///
/// ```
/// use lensdrop::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/Pictures"), "/host/Pictures");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

/// Maps a user-supplied path onto the sandbox filesystem.
///
/// Tilde paths and relative paths resolve under `/host`; absolute paths are
/// kept as they are.
///
/// ```
/// use lensdrop::infrastructure::resolve_host_path;
///
/// assert_eq!(resolve_host_path("Pictures/cat.jpg"), "/host/Pictures/cat.jpg");
/// assert_eq!(resolve_host_path("~/cat.jpg"), "/host/cat.jpg");
/// assert_eq!(resolve_host_path("/tmp/cat.jpg"), "/tmp/cat.jpg");
/// ```
#[must_use]
pub fn resolve_host_path(path: &str) -> String {
    if path.starts_with('~') {
        expand_tilde(path)
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/host/{}", path.trim_start_matches("./"))
    }
}

/// Cleans up a path as terminals and file managers paste it.
///
/// Strips surrounding whitespace and matching quotes, and turns `file://`
/// URIs into plain percent-decoded paths.
///
/// ```
/// use lensdrop::infrastructure::normalize_dropped_path;
///
/// assert_eq!(normalize_dropped_path("'/tmp/my cat.jpg' "), "/tmp/my cat.jpg");
/// assert_eq!(normalize_dropped_path("file:///tmp/my%20cat.jpg"), "/tmp/my cat.jpg");
/// ```
#[must_use]
pub fn normalize_dropped_path(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = ['\'', '"']
        .iter()
        .find_map(|q| trimmed.strip_prefix(*q).and_then(|s| s.strip_suffix(*q)))
        .unwrap_or(trimmed);

    match unquoted.strip_prefix("file://") {
        Some(uri_path) => urlencoding::decode(uri_path)
            .map_or_else(|_| uri_path.to_string(), std::borrow::Cow::into_owned),
        None => unquoted.to_string(),
    }
}

/// Removes the `/host` prefix from sandbox paths for display purposes.
#[must_use]
pub fn strip_host_prefix(path: &str) -> String {
    path.strip_prefix("/host").unwrap_or(path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_escaped_spaces_are_kept_verbatim() {
        assert_eq!(normalize_dropped_path("\"a b.png\""), "a b.png");
        assert_eq!(normalize_dropped_path("'unterminated.png"), "'unterminated.png");
    }

    #[test]
    fn host_prefix_round_trips_for_display() {
        let resolved = resolve_host_path("~/Pictures/cat.jpg");
        assert_eq!(strip_host_prefix(&resolved), "/Pictures/cat.jpg");
    }
}
