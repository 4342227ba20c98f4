//! Domain layer with core business entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Classification and identity rules.
pub mod services;

pub use entities::{IdentityTriple, SenryuEvent, SenryuKind, User};
pub use errors::{PlatformError, QuoteError, StoreError};
pub use services::{IdentityCascade, SenryuClassifier};
