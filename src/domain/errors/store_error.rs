//! Persistence error types.

use thiserror::Error;

/// Failure of the local store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the store file failed.
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),

    /// The store file is not valid TOML.
    #[error("failed to parse store file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The store could not be serialized.
    #[error("failed to serialize store: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A record parsed but holds invalid data.
    #[error("corrupt store record {key}: {reason}")]
    Corrupt {
        /// Record key.
        key: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A record with this key is already present.
    #[error("record already exists: {key}")]
    AlreadyExists {
        /// Record key.
        key: String,
    },

    /// The store cannot be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
