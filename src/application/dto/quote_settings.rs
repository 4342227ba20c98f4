//! Validated pipeline settings.

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::entities::SecretToken;
use crate::domain::errors::QuoteError;

/// Directory rendered images are staged in before upload.
pub const DEFAULT_STAGING_DIR: &str = "./Temp/miq";
/// CDN folder quote images are uploaded under.
pub const DEFAULT_CDN_SUBPATH: &str = "senryu";
/// Per-request timeout for outbound HTTP calls.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Linear backoff between CDN upload attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Never zero.
    pub max_attempts: u32,
    /// Wait added per failed attempt.
    pub backoff_step: Duration,
}

impl RetryPolicy {
    /// Creates a policy; zero attempts is bumped to one.
    #[must_use]
    pub const fn new(max_attempts: u32, backoff_step: Duration) -> Self {
        Self {
            max_attempts: if max_attempts == 0 { 1 } else { max_attempts },
            backoff_step,
        }
    }

    /// Wait after failed attempt `attempt` (1-based) before the next one.
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff_step
            .checked_mul(attempt)
            .unwrap_or(Duration::MAX)
    }

    /// Every wait a fully failing upload goes through, in order.
    #[must_use]
    pub fn schedule(&self) -> Vec<Duration> {
        (1..self.max_attempts)
            .map(|attempt| self.delay_after(attempt))
            .collect()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(2))
    }
}

/// Endpoints and credentials the quote pipeline cannot run without.
///
/// Construction fails with [`QuoteError::CdnConfig`] when any of them is
/// blank, so a pipeline built from these settings never discovers missing
/// configuration mid-flight.
#[derive(Debug, Clone)]
pub struct QuoteSettings {
    /// Quote-rendering API endpoint.
    pub render_api_url: String,
    /// CDN upload base URL, without trailing slash.
    pub cdn_upload_url: String,
    /// Bearer token for the CDN.
    pub cdn_token: SecretToken,
    /// Folder under the CDN base URL.
    pub cdn_subpath: String,
    /// Local directory for downloaded renders.
    pub staging_dir: PathBuf,
    /// Timeout applied to each outbound request.
    pub request_timeout: Duration,
    /// CDN upload retry policy.
    pub retry: RetryPolicy,
}

impl QuoteSettings {
    /// Validates the required settings.
    ///
    /// # Errors
    /// Returns `CdnConfig` naming the first missing setting.
    pub fn new(
        render_api_url: impl Into<String>,
        cdn_upload_url: impl Into<String>,
        cdn_token: impl Into<String>,
    ) -> Result<Self, QuoteError> {
        let render_api_url = render_api_url.into().trim().to_string();
        if render_api_url.is_empty() {
            return Err(QuoteError::missing_config("QUOTE_API_URL"));
        }

        let cdn_token =
            SecretToken::new(cdn_token).ok_or(QuoteError::missing_config("CDN_TOKEN"))?;

        let cdn_upload_url = cdn_upload_url.into().trim().trim_end_matches('/').to_string();
        if cdn_upload_url.is_empty() {
            return Err(QuoteError::missing_config("CDN_UPLOAD_URL"));
        }

        Ok(Self {
            render_api_url,
            cdn_upload_url,
            cdn_token,
            cdn_subpath: DEFAULT_CDN_SUBPATH.to_string(),
            staging_dir: PathBuf::from(DEFAULT_STAGING_DIR),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            retry: RetryPolicy::default(),
        })
    }

    /// Sets the CDN folder, trimming surrounding slashes.
    #[must_use]
    pub fn with_subpath(mut self, subpath: impl Into<String>) -> Self {
        self.cdn_subpath = subpath.into().trim_matches('/').to_string();
        self
    }

    /// Sets the staging directory.
    #[must_use]
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = dir.into();
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Replaces the retry policy.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Upload endpoint for `subpath` under the CDN base URL.
    #[must_use]
    pub fn upload_endpoint(&self, subpath: &str) -> String {
        format!("{}/{}", self.cdn_upload_url, subpath.trim_matches('/'))
    }
}
