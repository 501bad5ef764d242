//! Display URL normalization for result and preview paths.
//!
//! The backend hands out either absolute URLs or paths relative to its root
//! (`static/img/cat1.jpg`, sometimes `/static/...`). Everything shown in the
//! grid is normalized to an absolute URL or a single-slash rooted path.

/// Schemes that mark a path as already absolute.
const ABSOLUTE_SCHEMES: [&str; 5] = ["http://", "https://", "data:", "blob:", "file://"];

/// Whether `path` carries a recognized URL scheme.
#[must_use]
pub fn is_absolute_url(path: &str) -> bool {
    ABSOLUTE_SCHEMES.iter().any(|scheme| {
        path.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Derives the display URL for a backend path.
///
/// Absolute URLs pass through unchanged. Anything else is treated as
/// server-relative: leading separators are collapsed and exactly one `/` is
/// prefixed. Applying it twice yields the same string.
///
/// ```
/// use lensdrop::ui::urls::display_url;
///
/// assert_eq!(display_url("static/img/cat1.jpg"), "/static/img/cat1.jpg");
/// assert_eq!(display_url("//uploads/u1.jpg"), "/uploads/u1.jpg");
/// assert_eq!(display_url("https://cdn.example/x.png"), "https://cdn.example/x.png");
/// ```
#[must_use]
pub fn display_url(path: &str) -> String {
    if is_absolute_url(path) {
        return path.to_string();
    }
    format!("/{}", path.trim_start_matches('/'))
}

/// Resolves a display URL against the backend base for fetching.
///
/// Returns `None` for inline URLs (`data:`, `blob:`) and local files, which
/// have nothing to fetch from the backend.
#[must_use]
pub fn fetch_url(backend_url: &str, display: &str) -> Option<String> {
    let lower = display.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Some(display.to_string())
    } else if is_absolute_url(display) {
        None
    } else {
        Some(format!("{backend_url}{}", display_url(display)))
    }
}

/// Last path segment, used as a grid cell label.
#[must_use]
pub fn file_label(display: &str) -> &str {
    let without_query = display.split(['?', '#']).next().unwrap_or(display);
    without_query
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(display)
}
