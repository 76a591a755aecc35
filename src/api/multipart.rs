//! Buffering of multipart form submissions.

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::domain::upload::InMemoryUpload;
use crate::error::AppError;

/// Form field carrying photo uploads.
pub const PHOTO_FIELD: &str = "foto";

/// A fully buffered multipart form.
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    pub files: Vec<InMemoryUpload>,
}

impl UploadForm {
    /// Reads every part of the request.
    ///
    /// Parts named [`PHOTO_FIELD`] with a filename become upload candidates.
    /// A photo part with an empty filename is what browsers send for an
    /// empty file input and is skipped. Other named parts are kept as text;
    /// a repeated text field keeps its first value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] when the body is malformed or exceeds the
    /// request size limit.
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == PHOTO_FIELD {
                let Some(filename) = field.file_name().map(str::to_string) else {
                    continue;
                };
                if filename.is_empty() {
                    continue;
                }

                let data = field.bytes().await?;
                form.files.push(InMemoryUpload::new(filename, data.to_vec()));
            } else {
                let value = field.text().await?;
                form.fields.entry(name).or_insert(value);
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}
