//! Domain error types.

mod platform_error;
mod quote_error;
mod store_error;

pub use platform_error::PlatformError;
pub use quote_error::{FailureCategory, QuoteError, UploadAttemptError};
pub use store_error::StoreError;
