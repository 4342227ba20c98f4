//! Avatar and display-name precedence rules.

use crate::domain::entities::{IdentityTriple, Member, User};

/// Precedence rules for avatars and display names.
pub struct IdentityCascade;

impl IdentityCascade {
    /// Guild avatar override, then global avatar, then `default_url`.
    #[must_use]
    pub fn avatar_url(member: Option<&Member>, user: &User, default_url: &str) -> String {
        member
            .and_then(|member| member.guild_avatar_url(user.id()))
            .or_else(|| user.avatar_url())
            .unwrap_or_else(|| default_url.to_string())
    }

    /// Guild nickname, then global name, then username.
    #[must_use]
    pub fn display_name(member: Option<&Member>, user: &User) -> String {
        member
            .and_then(Member::nick)
            .unwrap_or_else(|| user.display_name())
            .to_string()
    }

    /// Identity with the avatar already decided by the caller.
    #[must_use]
    pub fn identity_with_avatar(
        member: Option<&Member>,
        user: &User,
        avatar_url: impl Into<String>,
    ) -> IdentityTriple {
        IdentityTriple::new(
            avatar_url,
            user.username(),
            Self::display_name(member, user),
        )
    }

    /// Full identity for an author.
    #[must_use]
    pub fn identity(member: Option<&Member>, user: &User, default_url: &str) -> IdentityTriple {
        Self::identity_with_avatar(
            member,
            user,
            Self::avatar_url(member, user, default_url),
        )
    }
}
