//! Data transfer objects for the application layer.

mod quote_dto;
mod quote_settings;

pub use quote_dto::{QuoteOutcome, QuoteRequest, RejectionReason};
pub use quote_settings::{
    DEFAULT_CDN_SUBPATH, DEFAULT_REQUEST_TIMEOUT, DEFAULT_STAGING_DIR, QuoteSettings, RetryPolicy,
};
