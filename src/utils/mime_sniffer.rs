//! Content-type detection from byte signatures.
//!
//! The claimed filename and the client-declared content type are never
//! consulted here. Only the leading bytes of the payload decide the result.

/// Number of leading bytes inspected when sniffing a payload.
pub const SNIFF_WINDOW: usize = 2048;

const FALLBACK_BINARY: &str = "application/octet-stream";

/// Detects the MIME type of a payload from its leading bytes.
///
/// Raster image formats are recognized via the `image` crate's magic-byte
/// table. Anything else is classified by a small set of text heuristics:
///
/// | Payload | Result |
/// |---|---|
/// | empty | `application/x-empty` |
/// | contains NUL or invalid UTF-8 | `application/octet-stream` |
/// | starts with `#!` | `text/x-shellscript` |
/// | starts with `<?php` | `text/x-php` |
/// | starts with `<html`, `<!doctype html` or `<script` | `text/html` |
/// | other UTF-8 text | `text/plain` |
///
/// # Examples
///
/// ```ignore
/// assert_eq!(sniff_mime(b"\x89PNG\r\n\x1a\n...."), "image/png");
/// assert_eq!(sniff_mime(b"echo pwned"), "text/plain");
/// ```
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    match image::guess_format(bytes) {
        Ok(format) => format.to_mime_type(),
        Err(_) => sniff_non_image(bytes),
    }
}

fn sniff_non_image(bytes: &[u8]) -> &'static str {
    if bytes.is_empty() {
        return "application/x-empty";
    }

    if bytes.contains(&0) {
        return FALLBACK_BINARY;
    }

    // The window may cut a multi-byte character in half; only reject
    // sequences that are invalid, not ones that are merely truncated.
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) if e.error_len().is_none() => {
            std::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default()
        }
        Err(_) => return FALLBACK_BINARY,
    };

    let head = text.trim_start();
    if head.starts_with("#!") {
        return "text/x-shellscript";
    }

    let lowered: String = head.chars().take(16).collect::<String>().to_lowercase();
    if lowered.starts_with("<?php") {
        "text/x-php"
    } else if lowered.starts_with("<html")
        || lowered.starts_with("<!doctype html")
        || lowered.starts_with("<script")
    {
        "text/html"
    } else {
        "text/plain"
    }
}
