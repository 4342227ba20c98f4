/// Background avatar cache write-back.
pub mod avatar_cache_writer;
/// Candidate selection strategies.
pub mod candidate_selector;
/// Poet identity resolution.
pub mod identity_resolver;

pub use avatar_cache_writer::{AvatarCacheWriter, DEFAULT_QUEUE_CAPACITY};
pub use candidate_selector::{CandidateSelector, RandomCandidateSelector};
pub use identity_resolver::{IdentityResolver, ResolveContext};
