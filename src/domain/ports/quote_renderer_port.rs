//! Quote rendering port definition.

use async_trait::async_trait;

use crate::domain::entities::{IdentityTriple, StagedImage};
use crate::domain::errors::QuoteError;

/// Port for turning a poem and an identity into a staged quote image.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteRendererPort: Send + Sync {
    /// Renders the quote and stages the resulting image locally.
    async fn render(
        &self,
        identity: &IdentityTriple,
        text: &str,
    ) -> Result<StagedImage, QuoteError>;
}
