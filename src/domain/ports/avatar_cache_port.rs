//! Avatar cache port definition.

use async_trait::async_trait;

use crate::domain::entities::{AvatarCacheEntry, UserId};
use crate::domain::errors::StoreError;

/// Durable author id to avatar URL mapping.
#[async_trait]
pub trait AvatarCachePort: Send + Sync {
    /// Returns the last recorded avatar for the user.
    async fn get_avatar(&self, user_id: UserId) -> Result<Option<AvatarCacheEntry>, StoreError>;

    /// Inserts or overwrites the avatar for the user.
    async fn put_avatar(&self, user_id: UserId, avatar_url: &str) -> Result<(), StoreError>;
}
