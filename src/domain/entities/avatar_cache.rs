use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// Last observed avatar URL for an author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarCacheEntry {
    /// Author the avatar belongs to.
    pub user_id: UserId,
    /// Last known avatar URL.
    pub avatar_url: String,
    /// When the entry was last written.
    pub updated_at: DateTime<Utc>,
}

impl AvatarCacheEntry {
    /// Creates entry stamped with the current time.
    #[must_use]
    pub fn new(user_id: UserId, avatar_url: impl Into<String>) -> Self {
        Self {
            user_id,
            avatar_url: avatar_url.into(),
            updated_at: Utc::now(),
        }
    }
}
