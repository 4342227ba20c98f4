//! Image publishing port definition.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::errors::QuoteError;

/// Port for publishing image bytes and obtaining their public URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuotePublisherPort: Send + Sync {
    /// Uploads `content` under `subpath` and returns the normalized public URL.
    async fn publish(
        &self,
        content: Bytes,
        subpath: &str,
        filename: &str,
        content_type: &str,
    ) -> Result<String, QuoteError>;
}
