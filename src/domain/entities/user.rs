//! Discord user entity.

use serde::{Deserialize, Serialize};

const DISCORD_CDN_BASE: &str = "https://cdn.discordapp.com";

/// Pixel size requested for avatar images handed to the renderer.
pub const AVATAR_SIZE: u16 = 1024;

/// Unique identifier for a Discord user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl UserId {
    /// Returns the underlying u64 value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::str::FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Discord user account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: String,
    global_name: Option<String>,
    avatar: Option<String>,
    bot: bool,
}

impl User {
    /// Creates a user without a global display name.
    #[must_use]
    pub fn new(
        id: impl Into<UserId>,
        username: impl Into<String>,
        avatar: Option<String>,
        bot: bool,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            global_name: None,
            avatar,
            bot,
        }
    }

    /// Sets the global display name.
    #[must_use]
    pub fn with_global_name(mut self, global_name: impl Into<String>) -> Self {
        self.global_name = Some(global_name.into());
        self
    }

    /// Returns the user ID.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the unique username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the global display name, if set.
    #[must_use]
    pub fn global_name(&self) -> Option<&str> {
        self.global_name.as_deref().filter(|name| !name.is_empty())
    }

    /// Returns the avatar hash, if set.
    #[must_use]
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref().filter(|hash| !hash.is_empty())
    }

    /// Returns whether the account is a bot.
    #[must_use]
    pub const fn is_bot(&self) -> bool {
        self.bot
    }

    /// Global avatar URL, if the user has uploaded one.
    #[must_use]
    pub fn avatar_url(&self) -> Option<String> {
        self.avatar().map(|hash| {
            let ext = if hash.starts_with("a_") { "gif" } else { "png" };
            format!(
                "{DISCORD_CDN_BASE}/avatars/{}/{hash}.{ext}?size={AVATAR_SIZE}",
                self.id
            )
        })
    }

    /// Discord's generated placeholder avatar for users without one.
    #[must_use]
    pub fn default_avatar_url(&self) -> String {
        let index = (self.id.as_u64() >> 22) % 6;
        format!("{DISCORD_CDN_BASE}/embed/avatars/{index}.png")
    }

    /// Global name when set, username otherwise.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.global_name().unwrap_or(&self.username)
    }
}
