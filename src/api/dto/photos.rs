//! DTOs for photo upload responses.

use serde::Serialize;

use crate::domain::upload::AcceptedFile;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub files: Vec<StoredFileInfo>,
}

/// A stored upload as exposed to clients.
///
/// The client-supplied filename is deliberately not echoed back.
#[derive(Debug, Serialize)]
pub struct StoredFileInfo {
    pub filename: String,
    pub url: String,
    pub content_type: String,
    pub size: u64,
}

impl StoredFileInfo {
    pub fn new(file: AcceptedFile, url: String) -> Self {
        Self {
            filename: file.filename,
            url,
            content_type: file.content_type,
            size: file.size,
        }
    }
}
