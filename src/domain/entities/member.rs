use serde::{Deserialize, Serialize};

use super::{AVATAR_SIZE, GuildId, User, UserId};

/// Guild-scoped view of a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    /// Guild the membership belongs to.
    pub guild_id: GuildId,
    /// Underlying user; absent in some payloads.
    pub user: Option<User>,
    /// Guild nickname.
    pub nick: Option<String>,
    /// Guild-scoped avatar hash.
    #[serde(default)]
    pub avatar: Option<String>,
}

impl Member {
    /// Creates member without nickname or guild avatar.
    #[must_use]
    pub const fn new(guild_id: GuildId, user: Option<User>) -> Self {
        Self {
            guild_id,
            user,
            nick: None,
            avatar: None,
        }
    }

    /// Sets the guild nickname.
    #[must_use]
    pub fn with_nick(mut self, nick: impl Into<String>) -> Self {
        self.nick = Some(nick.into());
        self
    }

    /// Sets the guild avatar hash.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Returns the member's user ID, if the user is present.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.user.as_ref().map(User::id)
    }

    /// Returns the non-empty guild nickname.
    #[must_use]
    pub fn nick(&self) -> Option<&str> {
        self.nick.as_deref().filter(|nick| !nick.is_empty())
    }

    /// Per-guild avatar override for `user_id`, if the member set one.
    #[must_use]
    pub fn guild_avatar_url(&self, user_id: UserId) -> Option<String> {
        self.avatar
            .as_deref()
            .filter(|hash| !hash.is_empty())
            .map(|hash| {
                format!(
                    "https://cdn.discordapp.com/guilds/{}/users/{user_id}/avatars/{hash}.png?size={AVATAR_SIZE}",
                    self.guild_id
                )
            })
    }
}
