//! Content-validated, all-or-nothing storage of uploaded images.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::upload::{AcceptedFile, UploadPolicy, UploadSource};
use crate::utils::filename::{claimed_extension, stored_filename};
use crate::utils::mime_sniffer::sniff_mime;

/// Errors returned by [`UploadValidator::save_all`].
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The sniffed content type is not allowed. Caused by the client.
    #[error("file type {detected} is not allowed ({filename})")]
    Rejected { filename: String, detected: String },

    /// The claimed extension is not allowed. Caused by the client.
    #[error("file extension \"{extension}\" is not allowed ({filename})")]
    DisallowedExtension { filename: String, extension: String },

    /// Storage failed. Not caused by the client.
    #[error("failed to store upload: {0}")]
    Io(#[from] io::Error),
}

impl UploadError {
    /// Returns `true` for errors the client can fix by sending other files.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}

/// Outcome of inspecting one candidate before anything is written.
struct Inspection {
    extension: Option<String>,
    content_type: &'static str,
}

/// Validates upload batches by content and stores them under unique names.
///
/// # Batch Semantics
///
/// A batch is all-or-nothing:
///
/// 1. Every candidate is inspected (extension gate, then MIME sniffing) before
///    the first byte is written. Any rejection aborts with nothing on disk.
/// 2. Accepted candidates are written in input order. If a write fails, the
///    files already written for the batch are removed before the error is
///    returned.
///
/// Writes are blocking; async callers should run this on a blocking thread.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    storage_dir: PathBuf,
    policy: UploadPolicy,
}

impl UploadValidator {
    pub fn new(storage_dir: impl Into<PathBuf>, policy: UploadPolicy) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            policy,
        }
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Validates and stores every candidate, returning their records in input order.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::DisallowedExtension`] or [`UploadError::Rejected`]
    /// for the first invalid candidate, with nothing written.
    ///
    /// Returns [`UploadError::Io`] if peeking or writing fails; files written
    /// earlier in the batch are removed first.
    pub fn save_all<S: UploadSource>(
        &self,
        candidates: &mut [S],
    ) -> Result<Vec<AcceptedFile>, UploadError> {
        let mut inspections = Vec::with_capacity(candidates.len());
        for candidate in candidates.iter_mut() {
            inspections.push(self.inspect(candidate)?);
        }

        let mut accepted: Vec<AcceptedFile> = Vec::with_capacity(candidates.len());
        for (candidate, inspection) in candidates.iter_mut().zip(inspections) {
            let filename = stored_filename(inspection.extension.as_deref());
            let path = self.storage_dir.join(&filename);

            match candidate.write_to(&path) {
                Ok(size) => accepted.push(AcceptedFile {
                    filename,
                    original_name: candidate.claimed_filename().to_string(),
                    content_type: inspection.content_type.to_string(),
                    size,
                }),
                Err(e) => {
                    tracing::error!(
                        path = %path.display(),
                        error = %e,
                        "Failed to write upload, rolling back batch"
                    );
                    if e.kind() != io::ErrorKind::AlreadyExists {
                        remove_quietly(&path);
                    }
                    self.discard(&accepted);
                    return Err(e.into());
                }
            }
        }

        if !accepted.is_empty() {
            tracing::info!(count = accepted.len(), "Stored uploaded files");
        }

        Ok(accepted)
    }

    /// Removes previously stored files, e.g. when the record they belong to
    /// could not be saved.
    ///
    /// Failures are logged and otherwise ignored.
    pub fn discard(&self, files: &[AcceptedFile]) {
        for file in files {
            remove_quietly(&self.storage_dir.join(&file.filename));
        }
    }

    fn inspect<S: UploadSource>(&self, candidate: &mut S) -> Result<Inspection, UploadError> {
        let claimed = candidate.claimed_filename().to_string();
        let extension = claimed_extension(&claimed);

        if !self.policy.allows_extension(extension.as_deref()) {
            tracing::warn!(filename = %claimed, "Rejected upload with disallowed extension");
            return Err(UploadError::DisallowedExtension {
                extension: extension.unwrap_or_default(),
                filename: claimed,
            });
        }

        let head = candidate.peek(self.policy.sniff_len())?;
        let content_type = sniff_mime(&head);

        if !self.policy.allows_mime(content_type) {
            tracing::warn!(
                filename = %claimed,
                detected = content_type,
                "Rejected upload with disallowed content type"
            );
            return Err(UploadError::Rejected {
                filename: claimed,
                detected: content_type.to_string(),
            });
        }

        Ok(Inspection {
            extension,
            content_type,
        })
    }
}

fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path)
        && e.kind() != io::ErrorKind::NotFound
    {
        tracing::warn!(path = %path.display(), error = %e, "Failed to remove upload");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::upload::{InMemoryUpload, MockUploadSource};

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR-rest-of-image";
    const JPEG: &[u8] = b"\xFF\xD8\xFF\xE0\0\x10JFIF\0-rest-of-image";

    fn files_in(dir: &Path) -> usize {
        fs::read_dir(dir).unwrap().count()
    }

    fn validator(dir: &Path) -> UploadValidator {
        UploadValidator::new(dir, UploadPolicy::default())
    }

    #[test]
    fn test_save_all_accepts_png() {
        let dir = tempfile::tempdir().unwrap();
        let mut batch = vec![InMemoryUpload::new("pantai.png", PNG)];

        let saved = validator(dir.path()).save_all(&mut batch).unwrap();

        assert_eq!(saved.len(), 1);
        assert!(saved[0].filename.ends_with(".png"));
        assert_eq!(saved[0].original_name, "pantai.png");
        assert_eq!(saved[0].content_type, "image/png");
        assert_eq!(saved[0].size, PNG.len() as u64);
        assert_eq!(fs::read(dir.path().join(&saved[0].filename)).unwrap(), PNG);
    }

    #[test]
    fn test_save_all_extension_comes_from_claimed_name() {
        // PNG content named .jpg keeps the .jpg extension.
        let dir = tempfile::tempdir().unwrap();
        let mut batch = vec![InMemoryUpload::new("photo.jpg", PNG)];

        let saved = validator(dir.path()).save_all(&mut batch).unwrap();

        assert!(saved[0].filename.ends_with(".jpg"));
        assert_eq!(saved[0].content_type, "image/png");
    }

    #[test]
    fn test_save_all_rejects_whole_batch() {
        let dir = tempfile::tempdir().unwrap();
        let mut batch = vec![
            InMemoryUpload::new("one.png", PNG),
            InMemoryUpload::new("evil.jpg", b"<?php echo 'hi'; ?>".to_vec()),
            InMemoryUpload::new("two.jpg", JPEG),
        ];

        let err = validator(dir.path()).save_all(&mut batch).unwrap_err();

        match err {
            UploadError::Rejected { filename, detected } => {
                assert_eq!(filename, "evil.jpg");
                assert_eq!(detected, "text/x-php");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(files_in(dir.path()), 0);
    }

    #[test]
    fn test_save_all_extension_gate() {
        let dir = tempfile::tempdir().unwrap();
        let policy = UploadPolicy::default().with_allowed_extensions(["png", "jpg"]);
        let validator = UploadValidator::new(dir.path(), policy);
        let mut batch = vec![InMemoryUpload::new("image.webp", PNG)];

        let err = validator.save_all(&mut batch).unwrap_err();

        assert!(err.is_validation());
        assert!(matches!(
            err,
            UploadError::DisallowedExtension { ref extension, .. } if extension == "webp"
        ));
        assert_eq!(files_in(dir.path()), 0);
    }

    #[test]
    fn test_save_all_empty_batch() {
        let dir = tempfile::tempdir().unwrap();
        let mut batch: Vec<InMemoryUpload> = Vec::new();

        let saved = validator(dir.path()).save_all(&mut batch).unwrap();

        assert!(saved.is_empty());
    }

    #[test]
    fn test_save_all_rolls_back_on_write_failure() {
        let dir = tempfile::tempdir().unwrap();

        let mut failing = MockUploadSource::new();
        failing
            .expect_claimed_filename()
            .return_const("broken.png".to_string());
        failing.expect_peek().returning(|_| Ok(PNG.to_vec()));
        failing
            .expect_write_to()
            .returning(|_| Err(io::Error::other("disk full")));

        let mut batch: Vec<Box<dyn UploadSource>> = vec![
            Box::new(InMemoryUpload::new("first.png", PNG)),
            Box::new(failing),
        ];

        let err = validator(dir.path()).save_all(&mut batch).unwrap_err();

        assert!(matches!(err, UploadError::Io(_)));
        assert!(!err.is_validation());
        assert_eq!(files_in(dir.path()), 0);
    }

    #[test]
    fn test_save_all_peek_failure_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let mut unreadable = MockUploadSource::new();
        unreadable
            .expect_claimed_filename()
            .return_const("unreadable.png".to_string());
        unreadable
            .expect_peek()
            .returning(|_| Err(io::Error::from(io::ErrorKind::UnexpectedEof)));
        unreadable.expect_write_to().never();

        let err = validator(dir.path())
            .save_all(&mut [unreadable])
            .unwrap_err();

        assert!(matches!(err, UploadError::Io(_)));
    }

    #[test]
    fn test_save_all_peeks_with_policy_window() {
        let dir = tempfile::tempdir().unwrap();
        let validator = UploadValidator::new(dir.path(), UploadPolicy::default().with_sniff_len(16));

        let mut source = MockUploadSource::new();
        source
            .expect_claimed_filename()
            .return_const("a.gif".to_string());
        source
            .expect_peek()
            .withf(|limit| *limit == 16)
            .returning(|_| Ok(b"GIF89a".to_vec()));
        source.expect_write_to().returning(|_| Ok(6));

        let saved = validator.save_all(&mut [source]).unwrap();
        assert_eq!(saved[0].content_type, "image/gif");
    }

    #[test]
    fn test_discard_removes_files() {
        let dir = tempfile::tempdir().unwrap();
        let validator = validator(dir.path());
        let mut batch = vec![
            InMemoryUpload::new("a.png", PNG),
            InMemoryUpload::new("b.jpg", JPEG),
        ];

        let saved = validator.save_all(&mut batch).unwrap();
        assert_eq!(files_in(dir.path()), 2);

        validator.discard(&saved);
        assert_eq!(files_in(dir.path()), 0);

        // Discarding twice is harmless.
        validator.discard(&saved);
    }

    #[test]
    fn test_validator_exposes_its_policy() {
        let dir = tempfile::tempdir().unwrap();
        let validator = UploadValidator::new(dir.path(), UploadPolicy::new(["image/webp"]));

        assert_eq!(validator.storage_dir(), dir.path());
        assert_eq!(validator.policy().allowed_mimes(), vec!["image/webp"]);
        assert!(!validator.policy().allows_mime("image/png"));
    }

    #[test]
    fn test_upload_error_messages() {
        let rejected = UploadError::Rejected {
            filename: "x.jpg".to_string(),
            detected: "text/plain".to_string(),
        };
        assert_eq!(
            rejected.to_string(),
            "file type text/plain is not allowed (x.jpg)"
        );
        assert!(rejected.is_validation());
    }
}
