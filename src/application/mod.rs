//! Application layer with use cases, services and DTOs.

/// Data transfer objects.
pub mod dto;
/// Identity resolution and cache write-back.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{QuoteOutcome, QuoteRequest, QuoteSettings, RejectionReason, RetryPolicy};
pub use services::{AvatarCacheWriter, IdentityResolver};
pub use use_cases::QuoteImageUseCase;
