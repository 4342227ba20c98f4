use std::path::PathBuf;

use bytes::Bytes;

/// Rendered image held in memory, with its on-disk staging copy.
#[derive(Debug, Clone)]
pub struct StagedImage {
    /// Raw image bytes.
    pub bytes: Bytes,
    /// File name used for staging and upload.
    pub filename: String,
    /// Where the bytes were written.
    pub path: PathBuf,
}

impl StagedImage {
    /// Creates staged image record.
    #[must_use]
    pub fn new(bytes: Bytes, filename: impl Into<String>, path: PathBuf) -> Self {
        Self {
            bytes,
            filename: filename.into(),
            path,
        }
    }

    /// Returns image size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns whether the image has no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
