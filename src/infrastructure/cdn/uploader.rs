//! Multipart CDN uploader with linear backoff.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use super::url::normalize_cdn_url;
use crate::application::dto::QuoteSettings;
use crate::domain::errors::{QuoteError, UploadAttemptError};
use crate::domain::ports::QuotePublisherPort;

const FILE_PART_NAME: &str = "file";

/// Publishes images to the CDN.
pub struct CdnUploader {
    client: Client,
    settings: QuoteSettings,
}

impl CdnUploader {
    /// Creates uploader from validated settings.
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
            settings: settings.clone(),
        })
    }

    async fn attempt(
        &self,
        endpoint: &str,
        content: &Bytes,
        filename: &str,
        content_type: &str,
    ) -> Result<String, UploadAttemptError> {
        // A new form per attempt gets a fresh boundary.
        let part = Part::bytes(content.to_vec())
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|e| UploadAttemptError::build(e.to_string()))?;
        let form = Form::new().part(FILE_PART_NAME, part);

        let response = self
            .client
            .post(endpoint)
            .bearer_auth(self.settings.cdn_token.as_str())
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadAttemptError::transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UploadAttemptError::transport(format!("failed to read body: {e}")))?;

        if status != StatusCode::OK {
            return Err(UploadAttemptError::status(status.as_u16(), body));
        }

        Ok(body)
    }
}

#[async_trait]
impl QuotePublisherPort for CdnUploader {
    async fn publish(
        &self,
        content: Bytes,
        subpath: &str,
        filename: &str,
        content_type: &str,
    ) -> Result<String, QuoteError> {
        let endpoint = self.settings.upload_endpoint(subpath);
        let retry = self.settings.retry;
        let max_attempts = retry.max_attempts;
        let mut attempt = 1;

        loop {
            debug!(attempt, max_attempts, %filename, "Uploading to CDN");

            match self.attempt(&endpoint, &content, filename, content_type).await {
                Ok(body) => {
                    let url = normalize_cdn_url(&body);
                    info!(attempt, url = %url, "CDN upload succeeded");
                    return Ok(url);
                }
                Err(last) if attempt >= max_attempts => {
                    warn!(attempt, error = %last, "CDN upload failed, giving up");
                    return Err(QuoteError::CdnUpload {
                        attempts: attempt,
                        last,
                    });
                }
                Err(e) => {
                    let delay = retry.delay_after(attempt);
                    warn!(
                        attempt,
                        max_attempts,
                        error = %e,
                        ?delay,
                        "CDN upload failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
