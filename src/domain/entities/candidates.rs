//! Authors recorded for a "compose here" prompt.

use serde::{Deserialize, Serialize};

use super::{MessageId, UserId};

/// The three authors whose verses were combined under a prompt message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionCandidates {
    message_id: MessageId,
    authors: [UserId; 3],
}

impl CompositionCandidates {
    /// Records the upper, middle and lower verse authors.
    #[must_use]
    pub const fn new(message_id: MessageId, upper: UserId, middle: UserId, lower: UserId) -> Self {
        Self {
            message_id,
            authors: [upper, middle, lower],
        }
    }

    /// Returns the prompt message ID.
    #[must_use]
    pub const fn message_id(&self) -> MessageId {
        self.message_id
    }

    /// Authors in verse order: upper, middle, lower.
    #[must_use]
    pub const fn authors(&self) -> &[UserId; 3] {
        &self.authors
    }
}
