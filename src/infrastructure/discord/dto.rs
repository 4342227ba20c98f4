//! Discord REST response bodies.

use serde::Deserialize;

use crate::domain::entities::{
    ChannelId, GuildId, Member, Message, MessageId, MessageReference, User, UserId,
};
use crate::domain::errors::PlatformError;

/// User response from Discord API.
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: String,
    /// Username.
    pub username: String,
    /// Global display name.
    #[serde(default)]
    pub global_name: Option<String>,
    /// Avatar hash.
    pub avatar: Option<String>,
    /// Whether user is a bot.
    #[serde(default)]
    pub bot: bool,
}

impl UserResponse {
    /// Converts into the domain user.
    ///
    /// # Errors
    /// Returns `Unexpected` if the id is not a snowflake.
    pub fn into_user(self) -> Result<User, PlatformError> {
        let id: UserId = parse_snowflake(&self.id, "user")?;
        let user = User::new(id, self.username, self.avatar, self.bot);
        Ok(match self.global_name {
            Some(name) => user.with_global_name(name),
            None => user,
        })
    }
}

/// Guild member response from Discord API.
#[derive(Debug, Deserialize)]
pub struct MemberResponse {
    /// Account behind the membership. Omitted in some payloads.
    #[serde(default)]
    pub user: Option<UserResponse>,
    /// Guild nickname.
    #[serde(default)]
    pub nick: Option<String>,
    /// Guild-scoped avatar hash.
    #[serde(default)]
    pub avatar: Option<String>,
}

impl MemberResponse {
    /// Converts into the domain member of `guild_id`.
    ///
    /// # Errors
    /// Returns `Unexpected` if the nested user id is not a snowflake.
    pub fn into_member(self, guild_id: GuildId) -> Result<Member, PlatformError> {
        let user = self.user.map(UserResponse::into_user).transpose()?;
        let mut member = Member::new(guild_id, user);
        if let Some(nick) = self.nick {
            member = member.with_nick(nick);
        }
        if let Some(avatar) = self.avatar {
            member = member.with_avatar(avatar);
        }
        Ok(member)
    }
}

/// Reply target of a message.
#[derive(Debug, Deserialize)]
pub struct MessageReferenceResponse {
    /// Referenced message ID.
    #[serde(default)]
    pub message_id: Option<String>,
    /// Channel of the referenced message.
    #[serde(default)]
    pub channel_id: Option<String>,
}

/// Message response from Discord API.
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    /// Message ID.
    pub id: String,
    /// Channel ID.
    pub channel_id: String,
    /// Message author.
    pub author: UserResponse,
    /// Text content. Empty without the message content intent.
    #[serde(default)]
    pub content: String,
    /// Reply target, if any.
    #[serde(default)]
    pub message_reference: Option<MessageReferenceResponse>,
}

impl MessageResponse {
    /// Converts into the domain message.
    ///
    /// # Errors
    /// Returns `Unexpected` if the message, channel, or author id is not a snowflake.
    pub fn into_message(self) -> Result<Message, PlatformError> {
        let id: MessageId = parse_snowflake(&self.id, "message")?;
        let channel_id: ChannelId = parse_snowflake(&self.channel_id, "channel")?;
        let message = Message::new(id, channel_id, self.author.into_user()?, self.content);

        let Some(reference) = self.message_reference else {
            return Ok(message);
        };
        // Unparseable reference ids only lose the reply link.
        let reference = MessageReference::new(
            reference.message_id.and_then(|id| id.parse().ok()),
            reference.channel_id.and_then(|id| id.parse().ok()),
        );
        Ok(message.with_reference(reference))
    }
}

/// Error response from Discord API.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Error message.
    pub message: String,
    /// Seconds to wait when rate limited.
    #[serde(default)]
    pub retry_after: Option<f64>,
}

fn parse_snowflake<T>(value: &str, kind: &str) -> Result<T, PlatformError>
where
    T: std::str::FromStr,
{
    value
        .parse()
        .map_err(|_| PlatformError::unexpected(format!("invalid {kind} id: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_with_reply_reference() {
        let raw = r#"{
            "id": "200",
            "channel_id": "10",
            "author": {"id": "1", "username": "senryu-bot", "avatar": null, "bot": true},
            "content": "川柳を検出しました！",
            "message_reference": {"message_id": "199", "channel_id": "10", "guild_id": "5"}
        }"#;
        let message = serde_json::from_str::<MessageResponse>(raw)
            .unwrap()
            .into_message()
            .unwrap();

        assert!(message.author().is_bot());
        assert_eq!(
            message.replied_to(),
            Some((ChannelId(10), MessageId(199)))
        );
    }

    #[test]
    fn test_member_without_user_keeps_overrides() {
        let raw = r#"{"nick": "Poet", "avatar": "abc"}"#;
        let member = serde_json::from_str::<MemberResponse>(raw)
            .unwrap()
            .into_member(GuildId(5))
            .unwrap();

        assert_eq!(member.nick(), Some("Poet"));
        assert!(member.user.is_none());
    }

    #[test]
    fn test_invalid_user_id_is_rejected() {
        let raw = r#"{"id": "not-a-number", "username": "x", "avatar": null}"#;
        let error = serde_json::from_str::<UserResponse>(raw)
            .unwrap()
            .into_user()
            .unwrap_err();

        assert!(matches!(error, PlatformError::Unexpected { .. }));
    }
}
