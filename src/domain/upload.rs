//! Upload candidates, acceptance policy, and accepted-file records.
//!
//! An upload is untrusted until [`crate::application::services::UploadValidator`]
//! has sniffed its content. The [`UploadSource`] trait is the only capability
//! the validator needs from a payload: peek at the leading bytes without
//! consuming them, then write the full content to a path.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::utils::mime_sniffer::SNIFF_WINDOW;

/// A payload submitted for upload.
///
/// # Implementations
///
/// - [`InMemoryUpload`] - Multipart payloads already buffered by the web layer
/// - [`SeekableUpload`] - Any `Read + Seek` stream, such as a [`File`]
#[cfg_attr(test, mockall::automock)]
pub trait UploadSource {
    /// Filename claimed by the client. Untrusted.
    fn claimed_filename(&self) -> &str;

    /// Returns up to `limit` leading bytes without consuming them.
    ///
    /// A later [`UploadSource::write_to`] must still write the full content.
    fn peek(&mut self, limit: usize) -> io::Result<Vec<u8>>;

    /// Writes the full content to a new file at `destination`.
    ///
    /// Fails with [`io::ErrorKind::AlreadyExists`] instead of overwriting.
    fn write_to(&mut self, destination: &Path) -> io::Result<u64>;
}

impl<T: UploadSource + ?Sized> UploadSource for Box<T> {
    fn claimed_filename(&self) -> &str {
        (**self).claimed_filename()
    }

    fn peek(&mut self, limit: usize) -> io::Result<Vec<u8>> {
        (**self).peek(limit)
    }

    fn write_to(&mut self, destination: &Path) -> io::Result<u64> {
        (**self).write_to(destination)
    }
}

/// Opens `path` for writing, failing if it already exists.
fn create_new(path: &Path) -> io::Result<File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}

/// Upload whose content is already held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryUpload {
    filename: String,
    data: Vec<u8>,
}

impl InMemoryUpload {
    pub fn new(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl UploadSource for InMemoryUpload {
    fn claimed_filename(&self) -> &str {
        &self.filename
    }

    fn peek(&mut self, limit: usize) -> io::Result<Vec<u8>> {
        Ok(self.data[..limit.min(self.data.len())].to_vec())
    }

    fn write_to(&mut self, destination: &Path) -> io::Result<u64> {
        let mut file = create_new(destination)?;
        file.write_all(&self.data)?;
        file.sync_all()?;
        Ok(self.data.len() as u64)
    }
}

/// Upload backed by a seekable stream.
///
/// Peeking rewinds the stream to where it was, so the full content is still
/// available for the final write.
#[derive(Debug)]
pub struct SeekableUpload<R> {
    filename: String,
    reader: R,
}

impl<R: Read + Seek> SeekableUpload<R> {
    pub fn new(filename: impl Into<String>, reader: R) -> Self {
        Self {
            filename: filename.into(),
            reader,
        }
    }
}

impl<R: Read + Seek> UploadSource for SeekableUpload<R> {
    fn claimed_filename(&self) -> &str {
        &self.filename
    }

    fn peek(&mut self, limit: usize) -> io::Result<Vec<u8>> {
        let start = self.reader.stream_position()?;

        let mut buffer = Vec::with_capacity(limit);
        (&mut self.reader)
            .take(limit as u64)
            .read_to_end(&mut buffer)?;

        self.reader.seek(SeekFrom::Start(start))?;
        Ok(buffer)
    }

    fn write_to(&mut self, destination: &Path) -> io::Result<u64> {
        let mut file = create_new(destination)?;
        let written = io::copy(&mut self.reader, &mut file)?;
        file.sync_all()?;
        Ok(written)
    }
}

/// A validated upload persisted under a generated name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedFile {
    /// Generated storage name (`<uuid-v4>.<ext>`), relative to the upload folder.
    pub filename: String,
    /// Filename claimed by the client, kept for logging only.
    pub original_name: String,
    /// MIME type detected from the content.
    pub content_type: String,
    /// Bytes written.
    pub size: u64,
}

/// Which uploads are accepted.
///
/// Defaults to JPEG, PNG and GIF content with no extension restriction.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    allowed_mimes: HashSet<String>,
    allowed_extensions: Option<HashSet<String>>,
    sniff_len: usize,
}

impl UploadPolicy {
    pub const DEFAULT_MIME_TYPES: [&'static str; 3] = ["image/jpeg", "image/png", "image/gif"];

    /// Creates a policy accepting the given MIME types.
    pub fn new<I, S>(allowed_mimes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed_mimes: allowed_mimes
                .into_iter()
                .map(|m| m.as_ref().trim().to_ascii_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
            allowed_extensions: None,
            sniff_len: SNIFF_WINDOW,
        }
    }

    /// Also requires the claimed extension to be one of `extensions`
    /// (case-insensitive, leading dots ignored).
    ///
    /// An empty list leaves extensions unrestricted.
    pub fn with_allowed_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions: HashSet<String> = extensions
            .into_iter()
            .map(|e| e.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();

        self.allowed_extensions = (!extensions.is_empty()).then_some(extensions);
        self
    }

    /// Overrides how many leading bytes are inspected (minimum 1).
    pub fn with_sniff_len(mut self, sniff_len: usize) -> Self {
        self.sniff_len = sniff_len.max(1);
        self
    }

    pub fn sniff_len(&self) -> usize {
        self.sniff_len
    }

    pub fn allows_mime(&self, mime: &str) -> bool {
        self.allowed_mimes.contains(&mime.to_ascii_lowercase())
    }

    pub fn allows_extension(&self, extension: Option<&str>) -> bool {
        match (&self.allowed_extensions, extension) {
            (None, _) => true,
            (Some(allowed), Some(ext)) => allowed.contains(&ext.to_ascii_lowercase()),
            (Some(_), None) => false,
        }
    }

    /// Allowed MIME types, sorted for display.
    pub fn allowed_mimes(&self) -> Vec<&str> {
        let mut mimes: Vec<&str> = self.allowed_mimes.iter().map(String::as_str).collect();
        mimes.sort_unstable();
        mimes
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIME_TYPES)
    }
}
