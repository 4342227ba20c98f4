//! Infrastructure layer with external service adapters.

/// CDN publishing.
pub mod cdn;
/// Application configuration.
pub mod config;
/// Discord API client.
pub mod discord;
/// Quote rendering service client.
pub mod render;
/// File-backed stores.
pub mod storage;

pub use cdn::CdnUploader;
pub use config::{AppConfig, CliArgs, Command, ConfigLoader, LogLevel};
pub use discord::DiscordRestClient;
pub use render::QuoteApiClient;
pub use storage::FileStore;
