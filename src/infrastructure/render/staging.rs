//! Local staging of rendered images.

use std::path::PathBuf;

use bytes::Bytes;
use percent_encoding::percent_decode_str;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::StagedImage;
use crate::domain::errors::QuoteError;

/// Directory rendered images are written to before upload.
///
/// Files are left in place after upload.
#[derive(Debug, Clone)]
pub struct StagingArea {
    dir: PathBuf,
}

impl StagingArea {
    /// Creates a staging area rooted at `dir`. Nothing is created until first use.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Writes `bytes` under the last path segment of `source_url`.
    ///
    /// # Errors
    /// Returns `StagingIo` if the directory or file cannot be written.
    pub async fn stage(&self, source_url: &str, bytes: Bytes) -> Result<StagedImage, QuoteError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| QuoteError::staging(&self.dir, e))?;

        let filename = filename_from_url(source_url);
        let path = self.dir.join(&filename);
        fs::write(&path, &bytes)
            .await
            .map_err(|e| QuoteError::staging(&path, e))?;

        debug!(path = %path.display(), size = bytes.len(), "Staged rendered image");
        Ok(StagedImage::new(bytes, filename, path))
    }
}

/// Last non-empty path segment of `url`, percent-decoded, or a random `.png` name.
#[must_use]
pub fn filename_from_url(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|url| {
            let segment = url.path_segments()?.next_back()?;
            percent_decode_str(segment)
                .decode_utf8()
                .ok()
                .map(|name| name.into_owned())
        })
        .filter(|name| is_safe_filename(name))
        .unwrap_or_else(|| format!("{}.png", Uuid::new_v4()))
}

fn is_safe_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}
