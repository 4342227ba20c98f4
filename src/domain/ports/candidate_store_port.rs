//! Composition candidates port definition.

use async_trait::async_trait;

use crate::domain::entities::{CompositionCandidates, MessageId};
use crate::domain::errors::StoreError;

/// Create-once record of the authors behind a prompt message.
#[async_trait]
pub trait CandidateStorePort: Send + Sync {
    /// Returns the candidates recorded for the message.
    async fn get_candidates(
        &self,
        message_id: MessageId,
    ) -> Result<Option<CompositionCandidates>, StoreError>;

    /// Records candidates; fails if the message already has a record.
    async fn put_candidates(&self, candidates: &CompositionCandidates) -> Result<(), StoreError>;
}

/// In-memory fake for tests.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory candidate store for testing.
    #[derive(Clone, Default)]
    pub struct InMemoryCandidateStore {
        records: Arc<RwLock<HashMap<MessageId, CompositionCandidates>>>,
    }

    impl InMemoryCandidateStore {
        /// Creates empty store.
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates store holding one record.
        pub async fn with_candidates(candidates: CompositionCandidates) -> Self {
            let store = Self::new();
            store
                .records
                .write()
                .await
                .insert(candidates.message_id(), candidates);
            store
        }
    }

    #[async_trait]
    impl CandidateStorePort for InMemoryCandidateStore {
        async fn get_candidates(
            &self,
            message_id: MessageId,
        ) -> Result<Option<CompositionCandidates>, StoreError> {
            Ok(self.records.read().await.get(&message_id).cloned())
        }

        async fn put_candidates(
            &self,
            candidates: &CompositionCandidates,
        ) -> Result<(), StoreError> {
            let mut records = self.records.write().await;
            if records.contains_key(&candidates.message_id()) {
                return Err(StoreError::AlreadyExists {
                    key: candidates.message_id().to_string(),
                });
            }
            records.insert(candidates.message_id(), candidates.clone());
            Ok(())
        }
    }
}
