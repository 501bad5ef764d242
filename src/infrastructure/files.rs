//! Reading user-selected image files.
//!
//! The MIME type is derived from the file extension only; the upload handler
//! decides from it whether the file is acceptable.

use super::paths::{normalize_dropped_path, resolve_host_path};
use crate::domain::error::Result;
use crate::domain::SelectedFile;
use std::path::Path;

/// MIME type for a file name, by extension.
///
/// ```
/// use lensdrop::infrastructure::mime_type_for;
///
/// assert_eq!(mime_type_for("cat.JPG"), "image/jpeg");
/// assert_eq!(mime_type_for("notes.txt"), "text/plain");
/// assert_eq!(mime_type_for("archive.tar.gz"), "application/octet-stream");
/// ```
#[must_use]
pub fn mime_type_for(name: &str) -> &'static str {
    let extension = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "txt" | "md" | "csv" | "log" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Reads the file at a user-supplied path into a [`SelectedFile`].
///
/// # Errors
///
/// Returns [`ImageSearchError::Io`](crate::domain::ImageSearchError::Io) if
/// the file cannot be read.
pub fn read_selected_file(raw_path: &str) -> Result<SelectedFile> {
    let path = resolve_host_path(&normalize_dropped_path(raw_path));
    let _span = tracing::debug_span!("read_selected_file", path = %path).entered();

    let bytes = std::fs::read(&path)?;
    let name = Path::new(&path)
        .file_name()
        .map_or_else(|| path.clone(), |n| n.to_string_lossy().into_owned());

    tracing::debug!(size = bytes.len(), "read selected file");
    Ok(SelectedFile::new(name.clone(), mime_type_for(&name), bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_bytes_name_and_mime() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(&[0x89, b'P', b'N', b'G']).unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let selected = read_selected_file(&format!("  '{path}' ")).unwrap();

        assert_eq!(selected.mime_type, "image/png");
        assert_eq!(selected.bytes, vec![0x89, b'P', b'N', b'G']);
        assert!(selected.name.ends_with(".png"));
        assert!(!selected.name.contains('/'));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.jpg");
        let err = read_selected_file(&missing.to_string_lossy()).unwrap_err();
        assert!(matches!(err, crate::domain::ImageSearchError::Io(_)));
    }
}
