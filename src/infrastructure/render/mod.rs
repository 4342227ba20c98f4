//! Quote rendering adapters.

mod quote_api_client;
mod staging;

pub use quote_api_client::QuoteApiClient;
pub use staging::{StagingArea, filename_from_url};
