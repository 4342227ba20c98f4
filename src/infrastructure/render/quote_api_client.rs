//! Client for the quote rendering service.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::staging::StagingArea;
use crate::application::dto::QuoteSettings;
use crate::domain::entities::{IdentityTriple, StagedImage};
use crate::domain::errors::QuoteError;
use crate::domain::ports::QuoteRendererPort;

#[derive(Debug, Serialize)]
struct RenderRequest<'a> {
    username: &'a str,
    display_name: &'a str,
    text: &'a str,
    avatar: &'a str,
    color: bool,
}

#[derive(Debug, Deserialize)]
struct RenderResponse {
    url: String,
}

/// Renders quotes through the external quote API and stages the result.
pub struct QuoteApiClient {
    client: Client,
    api_url: String,
    staging: StagingArea,
}

impl QuoteApiClient {
    /// Creates client from validated settings.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(settings: &QuoteSettings) -> Result<Self, QuoteError> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| QuoteError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: settings.render_api_url.clone(),
            staging: StagingArea::new(settings.staging_dir.clone()),
        })
    }

    async fn request_render(&self, identity: &IdentityTriple, text: &str) -> Result<String, QuoteError> {
        let body = RenderRequest {
            username: &identity.username,
            display_name: &identity.display_name,
            text,
            avatar: &identity.avatar_url,
            color: true,
        };

        let response = self
            .client
            .post(&self.api_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| QuoteError::render_api(format!("request failed: {e}")))?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let detail = response.text().await.unwrap_or_default();
            warn!(%status, body = %detail, "Quote API rejected render request");
            return Err(QuoteError::render_api(format!("status {status}: {detail}")));
        }

        let rendered: RenderResponse = response
            .json()
            .await
            .map_err(|e| QuoteError::render_decode(e.to_string()))?;
        if rendered.url.trim().is_empty() {
            return Err(QuoteError::render_decode("response has empty url"));
        }

        Ok(rendered.url.trim().to_string())
    }

    async fn download(&self, url: &str) -> Result<bytes::Bytes, QuoteError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| QuoteError::image_download(format!("request failed: {e}")))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(QuoteError::image_download(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| QuoteError::image_download(format!("failed to read body: {e}")))
    }
}

#[async_trait]
impl QuoteRendererPort for QuoteApiClient {
    async fn render(&self, identity: &IdentityTriple, text: &str) -> Result<StagedImage, QuoteError> {
        debug!(username = %identity.username, "Requesting quote render");
        let image_url = self.request_render(identity, text).await?;

        debug!(url = %image_url, "Downloading rendered quote");
        let bytes = self.download(&image_url).await?;

        self.staging.stage(&image_url, bytes).await
    }
}
