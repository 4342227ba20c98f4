//! Boundaries between the pipeline and the outside world.

mod avatar_cache_port;
mod candidate_store_port;
mod platform_port;
mod quote_publisher_port;
mod quote_renderer_port;

pub use avatar_cache_port::AvatarCachePort;
pub use candidate_store_port::CandidateStorePort;
pub use platform_port::PlatformPort;
pub use quote_publisher_port::QuotePublisherPort;
pub use quote_renderer_port::QuoteRendererPort;
