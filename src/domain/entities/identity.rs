use serde::Serialize;

use super::User;

/// Display identity a quote image is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityTriple {
    /// Avatar image URL; never empty.
    pub avatar_url: String,
    /// Unique username.
    pub username: String,
    /// Name shown on the quote.
    pub display_name: String,
}

impl IdentityTriple {
    /// Creates identity; an empty display name falls back to the username.
    #[must_use]
    pub fn new(
        avatar_url: impl Into<String>,
        username: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        let username = username.into();
        let display_name = display_name.into();
        let display_name = if display_name.is_empty() {
            username.clone()
        } else {
            display_name
        };

        Self {
            avatar_url: avatar_url.into(),
            username,
            display_name,
        }
    }

    /// The bot's own identity, used whenever resolution cannot find an author.
    #[must_use]
    pub fn system(bot: &User) -> Self {
        let avatar_url = bot
            .avatar_url()
            .unwrap_or_else(|| bot.default_avatar_url());
        Self::new(avatar_url, bot.username(), bot.username())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_username() {
        let identity = IdentityTriple::new("https://a/b.png", "poet", "");
        assert_eq!(identity.display_name, "poet");
    }

    #[test]
    fn test_system_identity_always_has_avatar() {
        let bot = User::new(1_u64, "senryu-bot", None, true).with_global_name("Senryu");
        let identity = IdentityTriple::system(&bot);

        assert!(!identity.avatar_url.is_empty());
        assert_eq!(identity.username, "senryu-bot");
        assert_eq!(identity.display_name, "senryu-bot");
    }

    #[test]
    fn test_system_identity_uses_bot_avatar() {
        let bot = User::new(1_u64, "senryu-bot", Some("hash".into()), true);
        let identity = IdentityTriple::system(&bot);

        assert_eq!(
            identity.avatar_url,
            "https://cdn.discordapp.com/avatars/1/hash.png?size=1024"
        );
    }
}
