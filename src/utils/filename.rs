//! Storage name generation for uploaded files.
//!
//! Client-supplied filenames are untrusted: only their extension survives,
//! reduced to ASCII alphanumerics, and the base name is replaced by a random
//! UUID v4.

use std::path::Path;
use uuid::Uuid;

/// Extracts a filesystem-safe extension from a client-supplied filename.
///
/// Returns `None` when the name has no extension, is a dotfile (`.png`), or
/// the extension has no ASCII alphanumeric characters left after cleanup.
/// The original case is preserved.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(claimed_extension("photo.JPG").as_deref(), Some("JPG"));
/// assert_eq!(claimed_extension("../../etc/passwd"), None);
/// assert_eq!(claimed_extension("x.p\u{0}ng").as_deref(), Some("png"));
/// ```
pub fn claimed_extension(filename: &str) -> Option<String> {
    // Browsers on Windows may send the full client path.
    let basename = filename.rsplit(['/', '\\']).next().unwrap_or(filename);

    let extension = Path::new(basename).extension()?.to_str()?;
    let cleaned: String = extension
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();

    (!cleaned.is_empty()).then_some(cleaned)
}

/// Generates a unique storage filename, keeping the given extension.
///
/// # Examples
///
/// ```ignore
/// let name = stored_filename(Some("png"));
/// assert!(name.ends_with(".png"));
/// assert_eq!(name.len(), 36 + 4);
/// ```
pub fn stored_filename(extension: Option<&str>) -> String {
    let id = Uuid::new_v4();
    match extension {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}
