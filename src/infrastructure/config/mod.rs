//! Application configuration.

/// Config file sections and merged settings.
pub mod app_config;
/// Command-line arguments.
pub mod args;
/// Config file loading.
pub mod loader;

pub use app_config::{AppConfig, CdnConfig, DiscordConfig, LogLevel, QuoteApiConfig, StorageConfig};
pub use args::{CliArgs, Command};
pub use loader::{ConfigError, ConfigLoader};
