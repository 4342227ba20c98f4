//! Domain entity definitions.

mod avatar_cache;
mod candidates;
mod channel;
mod guild;
mod identity;
mod member;
mod message;
mod senryu;
mod staged_image;
mod token;
mod user;

pub use avatar_cache::AvatarCacheEntry;
pub use candidates::CompositionCandidates;
pub use channel::ChannelId;
pub use guild::GuildId;
pub use identity::IdentityTriple;
pub use member::Member;
pub use message::{Message, MessageId, MessageReference};
pub use senryu::{SenryuEvent, SenryuKind};
pub use staged_image::StagedImage;
pub use token::SecretToken;
pub use user::{AVATAR_SIZE, User, UserId};
