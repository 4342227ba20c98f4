//! Application configuration.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::args::CliArgs;
use crate::application::dto::{
    DEFAULT_CDN_SUBPATH, DEFAULT_REQUEST_TIMEOUT, DEFAULT_STAGING_DIR, QuoteSettings, RetryPolicy,
};
use crate::domain::entities::SecretToken;
use crate::domain::errors::QuoteError;

const APP_NAME: &str = "senryu-quote";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";
const STORE_FILE_NAME: &str = "store.toml";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration loaded from `config.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Chat platform credentials.
    #[serde(default)]
    pub discord: DiscordConfig,

    /// Render service configuration.
    #[serde(default)]
    pub quote: QuoteApiConfig,

    /// CDN upload configuration.
    #[serde(default)]
    pub cdn: CdnConfig,

    /// Local store configuration.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Chat platform configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Bot token.
    #[serde(default)]
    pub token: Option<String>,
}

/// Render service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteApiConfig {
    /// Quote render endpoint.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Directory rendered images are staged in.
    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,
}

impl Default for QuoteApiConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            temp_dir: default_temp_dir(),
        }
    }
}

/// CDN upload configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdnConfig {
    /// Upload base URL.
    #[serde(default)]
    pub upload_url: Option<String>,

    /// Bearer token.
    #[serde(default)]
    pub token: Option<String>,

    /// Path segment appended to the upload URL.
    #[serde(default = "default_subpath")]
    pub subpath: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Upload attempts before giving up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Linear backoff step in seconds.
    #[serde(default = "default_backoff_step_secs")]
    pub backoff_step_secs: u64,
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            upload_url: None,
            token: None,
            subpath: default_subpath(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            backoff_step_secs: default_backoff_step_secs(),
        }
    }
}

/// Local store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store file; defaults to the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_temp_dir() -> PathBuf {
    PathBuf::from(DEFAULT_STAGING_DIR)
}

fn default_subpath() -> String {
    DEFAULT_CDN_SUBPATH.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

fn default_max_attempts() -> u32 {
    RetryPolicy::default().max_attempts
}

fn default_backoff_step_secs() -> u64 {
    RetryPolicy::default().backoff_step.as_secs()
}

impl AppConfig {
    /// Merges CLI arguments (and their environment fallbacks) into config.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(token) = &args.discord_token {
            self.discord.token = Some(token.clone());
        }
        if let Some(api_url) = &args.quote_api_url {
            self.quote.api_url = Some(api_url.clone());
        }
        if let Some(upload_url) = &args.cdn_upload_url {
            self.cdn.upload_url = Some(upload_url.clone());
        }
        if let Some(token) = &args.cdn_token {
            self.cdn.token = Some(token.clone());
        }
        if let Some(store_path) = &args.store_path {
            self.storage.path = Some(store_path.clone());
        }
    }

    /// Validates the pipeline settings.
    ///
    /// # Errors
    /// Returns `CdnConfig` naming the first missing setting.
    pub fn quote_settings(&self) -> Result<QuoteSettings, QuoteError> {
        let settings = QuoteSettings::new(
            self.quote.api_url.as_deref().unwrap_or_default(),
            self.cdn.upload_url.as_deref().unwrap_or_default(),
            self.cdn.token.as_deref().unwrap_or_default(),
        )?;

        Ok(settings
            .with_subpath(self.cdn.subpath.as_str())
            .with_staging_dir(self.quote.temp_dir.clone())
            .with_request_timeout(Duration::from_secs(self.cdn.timeout_secs))
            .with_retry(RetryPolicy::new(
                self.cdn.max_attempts,
                Duration::from_secs(self.cdn.backoff_step_secs),
            )))
    }

    /// Returns the bot token, if configured.
    #[must_use]
    pub fn discord_token(&self) -> Option<SecretToken> {
        self.discord.token.clone().and_then(SecretToken::new)
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("senryu-quote.log"))
    }

    /// Returns default store file path.
    #[must_use]
    pub fn default_store_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join(STORE_FILE_NAME))
    }

    /// Returns effective config path (CLI override or default).
    #[must_use]
    pub fn effective_config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Self::default_config_path)
    }

    /// Returns effective log path (CLI override or default).
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns effective store path (configured or default).
    #[must_use]
    pub fn effective_store_path(&self) -> Option<PathBuf> {
        self.storage.path.clone().or_else(Self::default_store_path)
    }
}
