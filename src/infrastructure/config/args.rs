//! Command-line arguments.

use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "senryu-quote",
    version,
    about = "Renders senryu bot messages into quote images and publishes them to a CDN",
    long_about = None
)]
/// Command-line arguments. Secrets and endpoints fall back to the environment.
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Bot token.
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    pub discord_token: Option<String>,

    /// Quote render endpoint.
    #[arg(long, env = "QUOTE_API_URL")]
    pub quote_api_url: Option<String>,

    /// CDN upload base URL.
    #[arg(long, env = "CDN_UPLOAD_URL")]
    pub cdn_upload_url: Option<String>,

    /// CDN bearer token.
    #[arg(long, env = "CDN_TOKEN", hide_env_values = true)]
    pub cdn_token: Option<String>,

    /// Store file holding avatar cache and composition candidates.
    #[arg(long, value_name = "PATH")]
    pub store_path: Option<PathBuf>,

    /// Action to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Render a senryu bot message into a quote image and print its URL.
    Quote {
        /// Guild the message was posted in.
        #[arg(long)]
        guild_id: Option<u64>,

        /// Channel holding the message.
        #[arg(long)]
        channel_id: u64,

        /// Bot message to quote.
        #[arg(long)]
        message_id: u64,

        /// User requesting the image.
        #[arg(long)]
        invoker_id: Option<u64>,
    },

    /// Record the three authors behind a composition prompt.
    RecordCandidates {
        /// Prompt message id.
        message_id: u64,
        /// Upper verse author.
        upper: u64,
        /// Middle verse author.
        middle: u64,
        /// Lower verse author.
        lower: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quote_command() {
        let args = CliArgs::try_parse_from([
            "senryu-quote",
            "quote",
            "--guild-id",
            "1",
            "--channel-id",
            "2",
            "--message-id",
            "3",
        ])
        .unwrap();

        match args.command {
            Command::Quote {
                guild_id,
                channel_id,
                message_id,
                invoker_id,
            } => {
                assert_eq!(guild_id, Some(1));
                assert_eq!(channel_id, 2);
                assert_eq!(message_id, 3);
                assert_eq!(invoker_id, None);
            }
            Command::RecordCandidates { .. } => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn test_record_candidates_requires_three_authors() {
        let result = CliArgs::try_parse_from(["senryu-quote", "record-candidates", "1", "2", "3"]);
        assert!(result.is_err());
    }
}
