//! Application use cases.

mod quote_image_use_case;

pub use quote_image_use_case::{PNG_CONTENT_TYPE, QuoteImageUseCase};
