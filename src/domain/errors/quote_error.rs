//! Quote pipeline error types.

use std::path::PathBuf;

use thiserror::Error;

use super::{PlatformError, StoreError};

const UPLOAD_FAILED_MESSAGE: &str =
    "画像のCDNへのアップロードに失敗しました。しばらくしてからもう一度お試しください。";
const GENERATION_FAILED_MESSAGE: &str =
    "画像の生成に失敗しました。引用APIが応答していない可能性があります。";
const NOT_CONFIGURED_MESSAGE: &str = "この機能は現在設定されていません。";

/// Why a single CDN upload attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadAttemptError {
    /// The multipart request could not be built.
    #[error("CDN request creation error: {message}")]
    Build {
        /// Builder error.
        message: String,
    },

    /// Sending the request or reading the response failed.
    #[error("CDN upload request error: {message}")]
    Transport {
        /// Transport error.
        message: String,
    },

    /// The CDN answered with something other than 200.
    #[error("CDN upload failed with status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },
}

impl UploadAttemptError {
    /// Creates request build error.
    #[must_use]
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }

    /// Creates transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates non-success status error.
    #[must_use]
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }
}

/// User-facing grouping of pipeline failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    /// Required endpoints or credentials are missing.
    NotConfigured,
    /// The CDN rejected or never acknowledged the upload.
    Upload,
    /// The render service or the rendered image was unavailable.
    Generation,
    /// Anything else.
    Other,
}

/// Quote pipeline error variants.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// The render API was unreachable or answered with an error.
    #[error("quote API error: {message}")]
    RenderApi {
        /// Error details.
        message: String,
    },

    /// The render API response was not the expected JSON.
    #[error("failed to decode quote API response: {message}")]
    RenderDecode {
        /// Decode error.
        message: String,
    },

    /// The rendered image could not be fetched.
    #[error("failed to download image: {message}")]
    ImageDownload {
        /// Error details.
        message: String,
    },

    /// Writing the staged image failed.
    #[error("failed to stage image at {}: {source}", path.display())]
    StagingIo {
        /// Directory or file being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A required setting is missing.
    #[error("{setting} is not set")]
    CdnConfig {
        /// Name of the missing setting.
        setting: &'static str,
    },

    /// Every upload attempt failed.
    #[error("CDN upload failed after {attempts} attempts: {last}")]
    CdnUpload {
        /// Attempts made.
        attempts: u32,
        /// Failure of the final attempt.
        #[source]
        last: UploadAttemptError,
    },

    /// A Discord lookup failed.
    #[error("platform lookup failed: {0}")]
    Platform(#[from] PlatformError),

    /// The local store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Any other failure.
    #[error("unexpected quote pipeline error: {message}")]
    Unexpected {
        /// Error details.
        message: String,
    },
}

impl QuoteError {
    /// Creates render API error.
    #[must_use]
    pub fn render_api(message: impl Into<String>) -> Self {
        Self::RenderApi {
            message: message.into(),
        }
    }

    /// Creates render decode error.
    #[must_use]
    pub fn render_decode(message: impl Into<String>) -> Self {
        Self::RenderDecode {
            message: message.into(),
        }
    }

    /// Creates image download error.
    #[must_use]
    pub fn image_download(message: impl Into<String>) -> Self {
        Self::ImageDownload {
            message: message.into(),
        }
    }

    /// Creates staging error.
    #[must_use]
    pub fn staging(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StagingIo {
            path: path.into(),
            source,
        }
    }

    /// Creates missing configuration error.
    #[must_use]
    pub const fn missing_config(setting: &'static str) -> Self {
        Self::CdnConfig { setting }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns the user-facing group for this error.
    #[must_use]
    pub const fn category(&self) -> FailureCategory {
        match self {
            Self::CdnConfig { .. } => FailureCategory::NotConfigured,
            Self::CdnUpload { .. } => FailureCategory::Upload,
            Self::RenderApi { .. } | Self::RenderDecode { .. } | Self::ImageDownload { .. } => {
                FailureCategory::Generation
            }
            Self::StagingIo { .. }
            | Self::Platform(_)
            | Self::Store(_)
            | Self::Unexpected { .. } => FailureCategory::Other,
        }
    }

    /// Returns whether error came from the CDN upload step.
    #[must_use]
    pub const fn is_upload_error(&self) -> bool {
        matches!(self.category(), FailureCategory::Upload)
    }

    /// Text shown to the chat user who requested the image.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self.category() {
            FailureCategory::NotConfigured => NOT_CONFIGURED_MESSAGE.to_string(),
            FailureCategory::Upload => UPLOAD_FAILED_MESSAGE.to_string(),
            FailureCategory::Generation => GENERATION_FAILED_MESSAGE.to_string(),
            FailureCategory::Other => format!("エラーが発生しました: {self}"),
        }
    }
}
