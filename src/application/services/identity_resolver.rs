//! Resolves who a quote image is attributed to.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::{
    GuildId, IdentityTriple, Member, Message, SenryuEvent, SenryuKind, User, UserId,
};
use crate::domain::ports::{AvatarCachePort, CandidateStorePort, PlatformPort};
use crate::domain::services::IdentityCascade;

use super::avatar_cache_writer::AvatarCacheWriter;
use super::candidate_selector::CandidateSelector;

/// Per-request inputs to identity resolution.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    /// The bot message being quoted.
    pub target: &'a Message,
    /// Guild the message was posted in.
    pub guild_id: Option<GuildId>,
    /// Identity used when no author can be determined.
    pub default_identity: &'a IdentityTriple,
}

impl<'a> ResolveContext<'a> {
    /// Bundles the lookup inputs.
    #[must_use]
    pub const fn new(
        target: &'a Message,
        guild_id: Option<GuildId>,
        default_identity: &'a IdentityTriple,
    ) -> Self {
        Self {
            target,
            guild_id,
            default_identity,
        }
    }

    fn default_avatar(&self) -> &str {
        &self.default_identity.avatar_url
    }
}

/// Picks the author identity for a classified senryu event.
#[derive(Clone)]
pub struct IdentityResolver {
    platform: Arc<dyn PlatformPort>,
    candidates: Arc<dyn CandidateStorePort>,
    avatar_cache: Arc<dyn AvatarCachePort>,
    cache_writer: AvatarCacheWriter,
    selector: Arc<dyn CandidateSelector>,
}

impl IdentityResolver {
    /// Creates a resolver over the given lookups and stores.
    #[must_use]
    pub fn new(
        platform: Arc<dyn PlatformPort>,
        candidates: Arc<dyn CandidateStorePort>,
        avatar_cache: Arc<dyn AvatarCachePort>,
        cache_writer: AvatarCacheWriter,
        selector: Arc<dyn CandidateSelector>,
    ) -> Self {
        Self {
            platform,
            candidates,
            avatar_cache,
            cache_writer,
            selector,
        }
    }

    /// Resolves the identity for `event`.
    ///
    /// Never fails: any lookup error yields `ctx.default_identity` for all
    /// three fields.
    pub async fn resolve(&self, event: &SenryuEvent, ctx: &ResolveContext<'_>) -> IdentityTriple {
        let resolved = match event.kind() {
            SenryuKind::Detected
            | SenryuKind::Forbidden {
                referenced_author: None,
            } => self.resolve_reply_author(ctx).await,
            SenryuKind::Forbidden {
                referenced_author: Some(user_id),
            } => self.resolve_user(user_id, ctx).await,
            SenryuKind::Prompted => self.resolve_candidate(ctx).await,
            SenryuKind::Unknown => None,
        };

        resolved.unwrap_or_else(|| {
            warn!(
                kind = %event.kind(),
                message_id = %ctx.target.id(),
                "Identity resolution defaulted to system identity"
            );
            ctx.default_identity.clone()
        })
    }

    async fn resolve_reply_author(&self, ctx: &ResolveContext<'_>) -> Option<IdentityTriple> {
        let Some((channel_id, message_id)) = ctx.target.replied_to() else {
            debug!(message_id = %ctx.target.id(), "Target message is not a reply");
            return None;
        };

        let replied = self
            .platform
            .fetch_message(channel_id, message_id)
            .await
            .inspect_err(|e| warn!(error = %e, %message_id, "Failed to fetch replied message"))
            .ok()?;

        let author = replied.author();
        let member = self.member(ctx.guild_id, author.id()).await;
        Some(IdentityCascade::identity(
            member.as_ref(),
            author,
            ctx.default_avatar(),
        ))
    }

    async fn resolve_user(&self, user_id: UserId, ctx: &ResolveContext<'_>) -> Option<IdentityTriple> {
        let user = self.fetch_user(user_id).await?;
        let member = self.member(ctx.guild_id, user_id).await;
        Some(IdentityCascade::identity(
            member.as_ref(),
            &user,
            ctx.default_avatar(),
        ))
    }

    async fn resolve_candidate(&self, ctx: &ResolveContext<'_>) -> Option<IdentityTriple> {
        let candidates = match self.candidates.get_candidates(ctx.target.id()).await {
            Ok(Some(candidates)) => candidates,
            Ok(None) => {
                debug!(message_id = %ctx.target.id(), "No composition candidates recorded");
                return None;
            }
            Err(e) => {
                warn!(error = %e, message_id = %ctx.target.id(), "Failed to read composition candidates");
                return None;
            }
        };

        let authors = candidates.authors();
        let user_id = authors[self.selector.pick(authors.len())];
        debug!(%user_id, message_id = %ctx.target.id(), "Selected composition candidate");

        let user = self.fetch_user(user_id).await?;
        let member = self.member(ctx.guild_id, user_id).await;

        let avatar_url = match self.avatar_cache.get_avatar(user_id).await {
            Ok(Some(entry)) => {
                debug!(%user_id, "Avatar cache hit");
                entry.avatar_url
            }
            Ok(None) => self.live_avatar(member.as_ref(), &user, ctx),
            Err(e) => {
                debug!(%user_id, error = %e, "Avatar cache read failed, treating as miss");
                self.live_avatar(member.as_ref(), &user, ctx)
            }
        };

        Some(IdentityCascade::identity_with_avatar(
            member.as_ref(),
            &user,
            avatar_url,
        ))
    }

    fn live_avatar(&self, member: Option<&Member>, user: &User, ctx: &ResolveContext<'_>) -> String {
        let avatar_url = IdentityCascade::avatar_url(member, user, ctx.default_avatar());
        self.cache_writer.schedule(user.id(), avatar_url.clone());
        avatar_url
    }

    async fn fetch_user(&self, user_id: UserId) -> Option<User> {
        self.platform
            .fetch_user(user_id)
            .await
            .inspect_err(|e| warn!(error = %e, %user_id, "Failed to fetch user"))
            .ok()
    }

    async fn member(&self, guild_id: Option<GuildId>, user_id: UserId) -> Option<Member> {
        let guild_id = guild_id?;
        match self.platform.fetch_member(guild_id, user_id).await {
            Ok(member) => Some(member),
            Err(e) => {
                debug!(error = %e, %guild_id, %user_id, "No guild member record");
                None
            }
        }
    }
}
