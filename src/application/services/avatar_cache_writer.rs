//! Background write-back queue for the avatar cache.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::domain::entities::UserId;
use crate::domain::ports::AvatarCachePort;

/// Pending writes beyond this are dropped.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

#[derive(Debug)]
struct CacheWrite {
    user_id: UserId,
    avatar_url: String,
}

struct WriterInner {
    sender: Mutex<Option<mpsc::Sender<CacheWrite>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

/// Fire-and-forget avatar cache updates on a bounded queue.
///
/// `schedule` never waits: a full or closed queue drops the write. The worker
/// task lives until [`AvatarCacheWriter::shutdown`] drains the queue.
#[derive(Clone)]
pub struct AvatarCacheWriter {
    inner: Arc<WriterInner>,
}

impl std::fmt::Debug for AvatarCacheWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvatarCacheWriter")
            .field("open", &self.inner.sender.lock().is_some())
            .finish_non_exhaustive()
    }
}

impl AvatarCacheWriter {
    /// Spawns the worker on the current runtime.
    #[must_use]
    pub fn spawn(store: Arc<dyn AvatarCachePort>, capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let worker = tokio::spawn(Self::run_worker_loop(store, receiver));

        Self {
            inner: Arc::new(WriterInner {
                sender: Mutex::new(Some(sender)),
                worker: Mutex::new(Some(worker)),
            }),
        }
    }

    async fn run_worker_loop(
        store: Arc<dyn AvatarCachePort>,
        mut receiver: mpsc::Receiver<CacheWrite>,
    ) {
        while let Some(write) = receiver.recv().await {
            match store.put_avatar(write.user_id, &write.avatar_url).await {
                Ok(()) => trace!(user_id = %write.user_id, "Avatar cache updated"),
                Err(e) => debug!(user_id = %write.user_id, error = %e, "Dropped avatar cache write"),
            }
        }
        debug!("Avatar cache writer stopped");
    }

    /// Queues an upsert without waiting for it.
    pub fn schedule(&self, user_id: UserId, avatar_url: impl Into<String>) {
        let avatar_url = avatar_url.into();
        if avatar_url.is_empty() {
            return;
        }

        let sender = self.inner.sender.lock();
        let Some(sender) = sender.as_ref() else {
            trace!(user_id = %user_id, "Avatar cache writer closed, skipping write");
            return;
        };

        if let Err(e) = sender.try_send(CacheWrite {
            user_id,
            avatar_url,
        }) {
            debug!(user_id = %user_id, error = %e, "Avatar cache queue rejected write");
        }
    }

    /// Stops accepting writes and waits for queued ones to finish.
    pub async fn shutdown(&self) {
        drop(self.inner.sender.lock().take());

        let worker = self.inner.worker.lock().take();
        if let Some(worker) = worker
            && let Err(e) = worker.await
        {
            warn!(error = %e, "Avatar cache writer task failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::InMemoryAvatarCache;

    #[tokio::test]
    async fn test_scheduled_write_lands_after_shutdown() {
        let cache = InMemoryAvatarCache::new();
        let writer = AvatarCacheWriter::spawn(Arc::new(cache.clone()), 4);

        writer.schedule(UserId(1), "https://cdn.discordapp.com/avatars/1/a.png");
        writer.shutdown().await;

        assert_eq!(
            cache.peek(UserId(1)).await.as_deref(),
            Some("https://cdn.discordapp.com/avatars/1/a.png")
        );
    }

    #[tokio::test]
    async fn test_failed_write_is_swallowed() {
        let cache = InMemoryAvatarCache::new();
        cache.set_failing(true);
        let writer = AvatarCacheWriter::spawn(Arc::new(cache.clone()), 4);

        writer.schedule(UserId(1), "https://example.com/a.png");
        writer.shutdown().await;

        cache.set_failing(false);
        assert!(cache.peek(UserId(1)).await.is_none());
    }

    #[tokio::test]
    async fn test_schedule_after_shutdown_is_noop() {
        let cache = InMemoryAvatarCache::new();
        let writer = AvatarCacheWriter::spawn(Arc::new(cache.clone()), 4);
        writer.shutdown().await;

        writer.schedule(UserId(2), "https://example.com/b.png");
        writer.shutdown().await;

        assert!(cache.peek(UserId(2)).await.is_none());
    }

    #[tokio::test]
    async fn test_empty_url_is_not_written() {
        let cache = InMemoryAvatarCache::new();
        let writer = AvatarCacheWriter::spawn(Arc::new(cache.clone()), 4);

        writer.schedule(UserId(3), "");
        writer.shutdown().await;

        assert!(cache.peek(UserId(3)).await.is_none());
    }
}
