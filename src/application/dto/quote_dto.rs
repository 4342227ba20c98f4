//! Quote pipeline DTOs.

use crate::domain::entities::{GuildId, Message, User};

const NOT_BOT_MESSAGE_TEXT: &str = "川柳Botのメッセージのみ対応しています。";
const UNPARSABLE_TEXT: &str = "川柳のメッセージを解析できませんでした。";

/// A request to turn one bot message into a quote image.
#[derive(Debug, Clone)]
pub struct QuoteRequest {
    /// Message the user picked.
    pub target: Message,
    /// Guild the message lives in, for member lookups.
    pub guild_id: Option<GuildId>,
    /// User who asked for the image.
    pub invoker: Option<User>,
}

impl QuoteRequest {
    /// Creates request for a target message.
    #[must_use]
    pub const fn new(target: Message) -> Self {
        Self {
            target,
            guild_id: None,
            invoker: None,
        }
    }

    /// Sets the guild the message was posted in.
    #[must_use]
    pub const fn in_guild(mut self, guild_id: GuildId) -> Self {
        self.guild_id = Some(guild_id);
        self
    }

    /// Records the requesting user.
    #[must_use]
    pub fn invoked_by(mut self, invoker: User) -> Self {
        self.invoker = Some(invoker);
        self
    }
}

/// Why a request was declined without doing any work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// Target was not written by the senryu bot.
    NotBotMessage,
    /// Target did not match any senryu announcement.
    Unparsable,
}

impl RejectionReason {
    /// Returns user-facing explanation.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::NotBotMessage => NOT_BOT_MESSAGE_TEXT,
            Self::Unparsable => UNPARSABLE_TEXT,
        }
    }
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotBotMessage => write!(f, "not a bot message"),
            Self::Unparsable => write!(f, "classification rejected"),
        }
    }
}

/// Terminal state of a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteOutcome {
    /// Image is live at `url`.
    Published { url: String },
    /// Nothing to do for this message.
    Rejected(RejectionReason),
}

impl QuoteOutcome {
    /// Returns the published URL, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Published { url } => Some(url),
            Self::Rejected(_) => None,
        }
    }

    /// Text to send back to the requesting user.
    #[must_use]
    pub fn reply_text(&self) -> String {
        match self {
            Self::Published { url } => url.clone(),
            Self::Rejected(reason) => reason.user_message().to_string(),
        }
    }
}
