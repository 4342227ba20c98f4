//! TOML-file store for the avatar cache and composition candidates.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::entities::{AvatarCacheEntry, CompositionCandidates, MessageId, UserId};
use crate::domain::errors::StoreError;
use crate::domain::ports::{AvatarCachePort, CandidateStorePort};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    avatars: BTreeMap<String, AvatarRecord>,
    #[serde(default)]
    candidates: BTreeMap<String, CandidateRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AvatarRecord {
    avatar_url: String,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CandidateRecord {
    upper: String,
    middle: String,
    lower: String,
}

impl CandidateRecord {
    fn from_candidates(candidates: &CompositionCandidates) -> Self {
        let [upper, middle, lower] = candidates.authors();
        Self {
            upper: upper.to_string(),
            middle: middle.to_string(),
            lower: lower.to_string(),
        }
    }

    fn to_candidates(&self, message_id: MessageId) -> Result<CompositionCandidates, StoreError> {
        let parse = |value: &str| {
            value.parse::<UserId>().map_err(|e| StoreError::Corrupt {
                key: message_id.to_string(),
                reason: format!("invalid author id {value:?}: {e}"),
            })
        };
        Ok(CompositionCandidates::new(
            message_id,
            parse(&self.upper)?,
            parse(&self.middle)?,
            parse(&self.lower)?,
        ))
    }
}

/// Both stores kept in one TOML document, rewritten atomically on change.
pub struct FileStore {
    path: PathBuf,
    document: RwLock<StoreDocument>,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Opens the store, starting empty when the file does not exist.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let document = if fs::try_exists(&path).await? {
            let content = fs::read_to_string(&path).await?;
            toml::from_str(&content)?
        } else {
            info!(path = %path.display(), "Store file not found, starting empty");
            StoreDocument::default()
        };

        Ok(Self {
            path,
            document: RwLock::new(document),
            write_lock: Mutex::new(()),
        })
    }

    async fn persist(&self, document: StoreDocument) -> Result<(), StoreError> {
        let content = toml::to_string_pretty(&document)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_atomically(&path, &content))
            .await
            .map_err(|e| StoreError::Unavailable(format!("store writer panicked: {e}")))??;

        debug!(path = %self.path.display(), "Store persisted");
        Ok(())
    }
}

fn write_atomically(path: &Path, content: &str) -> Result<(), StoreError> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl AvatarCachePort for FileStore {
    async fn get_avatar(&self, user_id: UserId) -> Result<Option<AvatarCacheEntry>, StoreError> {
        let document = self.document.read();
        Ok(document
            .avatars
            .get(&user_id.to_string())
            .map(|record| AvatarCacheEntry {
                user_id,
                avatar_url: record.avatar_url.clone(),
                updated_at: record.updated_at,
            }))
    }

    async fn put_avatar(&self, user_id: UserId, avatar_url: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let snapshot = {
            let mut document = self.document.write();
            document.avatars.insert(
                user_id.to_string(),
                AvatarRecord {
                    avatar_url: avatar_url.to_string(),
                    updated_at: Utc::now(),
                },
            );
            document.clone()
        };

        self.persist(snapshot).await
    }
}

#[async_trait]
impl CandidateStorePort for FileStore {
    async fn get_candidates(
        &self,
        message_id: MessageId,
    ) -> Result<Option<CompositionCandidates>, StoreError> {
        let record = self
            .document
            .read()
            .candidates
            .get(&message_id.to_string())
            .cloned();
        record
            .map(|record| record.to_candidates(message_id))
            .transpose()
    }

    async fn put_candidates(&self, candidates: &CompositionCandidates) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let key = candidates.message_id().to_string();
        let snapshot = {
            let mut document = self.document.write();
            if document.candidates.contains_key(&key) {
                return Err(StoreError::AlreadyExists { key });
            }
            document
                .candidates
                .insert(key.clone(), CandidateRecord::from_candidates(candidates));
            document.clone()
        };

        if let Err(e) = self.persist(snapshot).await {
            self.document.write().candidates.remove(&key);
            return Err(e);
        }
        Ok(())
    }
}
