//! senryu-quote - Quote images for senryu bot messages.
//!
//! This crate classifies senryu bot announcements, resolves the author they
//! refer to, renders a quote image through an external service, and publishes
//! it to a CDN.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "senryu-quote";
