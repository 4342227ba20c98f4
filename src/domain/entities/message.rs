//! Discord message entity.

use serde::{Deserialize, Serialize};

use super::{ChannelId, User};

/// Unique identifier for a Discord message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl MessageId {
    /// Returns the underlying u64 value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MessageId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::str::FromStr for MessageId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Pointer to the message a reply was made to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageReference {
    message_id: Option<MessageId>,
    channel_id: Option<ChannelId>,
}

impl MessageReference {
    /// Creates a reference; either id may be absent.
    #[must_use]
    pub const fn new(message_id: Option<MessageId>, channel_id: Option<ChannelId>) -> Self {
        Self {
            message_id,
            channel_id,
        }
    }

    /// Returns the referenced message ID.
    #[must_use]
    pub const fn message_id(&self) -> Option<MessageId> {
        self.message_id
    }

    /// Returns the referenced channel ID.
    #[must_use]
    pub const fn channel_id(&self) -> Option<ChannelId> {
        self.channel_id
    }
}

/// Discord message as seen by the bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    channel_id: ChannelId,
    author: User,
    content: String,
    reference: Option<MessageReference>,
}

impl Message {
    /// Creates a message without a reply reference.
    #[must_use]
    pub fn new(
        id: impl Into<MessageId>,
        channel_id: impl Into<ChannelId>,
        author: User,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            channel_id: channel_id.into(),
            author,
            content: content.into(),
            reference: None,
        }
    }

    /// Attaches the reply reference.
    #[must_use]
    pub const fn with_reference(mut self, reference: MessageReference) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Returns the message ID.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the channel the message was posted in.
    #[must_use]
    pub const fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    /// Returns the message author.
    #[must_use]
    pub const fn author(&self) -> &User {
        &self.author
    }

    /// Returns the raw message text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Location of the replied-to message; a reference without a channel
    /// points into this message's own channel.
    #[must_use]
    pub fn replied_to(&self) -> Option<(ChannelId, MessageId)> {
        let reference = self.reference.as_ref()?;
        let message_id = reference.message_id()?;
        Some((
            reference.channel_id().unwrap_or(self.channel_id),
            message_id,
        ))
    }
}
