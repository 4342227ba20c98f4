//! CDN publishing adapters.

mod uploader;
mod url;

pub use uploader::CdnUploader;
pub use url::normalize_cdn_url;
