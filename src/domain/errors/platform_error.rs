//! Chat platform lookup error types.

use thiserror::Error;

/// Failure of a user, member, or message lookup.
#[derive(Debug, Clone, Error)]
pub enum PlatformError {
    /// The resource does not exist or is not visible to the bot.
    #[error("{resource} not found")]
    NotFound {
        /// What was looked up.
        resource: String,
    },

    /// The token was rejected or lacks access.
    #[error("request rejected by Discord: {message}")]
    Unauthorized {
        /// Rejection details.
        message: String,
    },

    /// Discord asked the client to back off.
    #[error("rate limited by Discord, retry after {retry_after_ms}ms")]
    RateLimited {
        /// Requested wait in milliseconds.
        retry_after_ms: u64,
    },

    /// The request never got a response.
    #[error("network error during lookup: {message}")]
    Network {
        /// Transport error details.
        message: String,
    },

    /// Any other failure, including malformed responses.
    #[error("unexpected lookup error: {message}")]
    Unexpected {
        /// Error details.
        message: String,
    },
}

impl PlatformError {
    /// Creates not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Creates unauthorized error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether the looked-up entity does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
