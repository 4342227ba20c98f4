//! Chat platform lookup port.

use async_trait::async_trait;

use crate::domain::entities::{ChannelId, GuildId, Member, Message, MessageId, User, UserId};
use crate::domain::errors::PlatformError;

/// Port for reading users, guild members, and messages from the chat platform.
#[async_trait]
pub trait PlatformPort: Send + Sync {
    /// Returns the bot's own account.
    async fn current_user(&self) -> Result<User, PlatformError>;

    /// Fetches a user by id.
    async fn fetch_user(&self, user_id: UserId) -> Result<User, PlatformError>;

    /// Fetches the guild-scoped member record of a user.
    async fn fetch_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Member, PlatformError>;

    /// Fetches a single message.
    async fn fetch_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<Message, PlatformError>;
}

/// In-memory fake for tests.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted platform backed by in-memory maps.
    pub struct MockPlatform {
        bot: User,
        users: HashMap<UserId, User>,
        members: HashMap<(GuildId, UserId), Member>,
        messages: HashMap<(ChannelId, MessageId), Message>,
        offline: bool,
        lookups: AtomicUsize,
    }

    impl MockPlatform {
        /// Creates platform that knows only the bot.
        pub fn new(bot: User) -> Self {
            Self {
                bot,
                users: HashMap::new(),
                members: HashMap::new(),
                messages: HashMap::new(),
                offline: false,
                lookups: AtomicUsize::new(0),
            }
        }

        /// Registers a user.
        pub fn with_user(mut self, user: User) -> Self {
            self.users.insert(user.id(), user);
            self
        }

        /// Registers a guild member.
        pub fn with_member(mut self, member: Member) -> Self {
            if let Some(user_id) = member.user_id() {
                self.members.insert((member.guild_id, user_id), member);
            }
            self
        }

        /// Registers a message.
        pub fn with_message(mut self, message: Message) -> Self {
            self.messages
                .insert((message.channel_id(), message.id()), message);
            self
        }

        /// Makes every lookup fail with a network error.
        pub fn offline(mut self) -> Self {
            self.offline = true;
            self
        }

        /// Number of lookups served so far.
        pub fn lookups(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }

        fn record(&self) -> Result<(), PlatformError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if self.offline {
                Err(PlatformError::network("mock platform offline"))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl PlatformPort for MockPlatform {
        async fn current_user(&self) -> Result<User, PlatformError> {
            self.record()?;
            Ok(self.bot.clone())
        }

        async fn fetch_user(&self, user_id: UserId) -> Result<User, PlatformError> {
            self.record()?;
            self.users
                .get(&user_id)
                .cloned()
                .ok_or_else(|| PlatformError::not_found(format!("user {user_id}")))
        }

        async fn fetch_member(
            &self,
            guild_id: GuildId,
            user_id: UserId,
        ) -> Result<Member, PlatformError> {
            self.record()?;
            self.members
                .get(&(guild_id, user_id))
                .cloned()
                .ok_or_else(|| PlatformError::not_found(format!("member {user_id}")))
        }

        async fn fetch_message(
            &self,
            channel_id: ChannelId,
            message_id: MessageId,
        ) -> Result<Message, PlatformError> {
            self.record()?;
            self.messages
                .get(&(channel_id, message_id))
                .cloned()
                .ok_or_else(|| PlatformError::not_found(format!("message {message_id}")))
        }
    }
}
