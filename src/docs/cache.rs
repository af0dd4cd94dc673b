//! TTL-gated holder for the process-wide documentation index.
//!
//! The cache never hands out a partial index: the index is built off to the
//! side and swapped in wholesale behind an `RwLock<Option<Arc<_>>>`.
//! Concurrent callers hitting a stale window may each trigger a rebuild;
//! both complete and the last write wins, which is benign because every
//! replacement is itself a complete index.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;

use super::fetcher::Fetcher;
use super::index::{DocsIndex, IndexBuilder};

struct CachedIndex {
    index: Arc<DocsIndex>,
    built_at: Instant,
}

/// Lazily rebuilt, TTL-gated index cache.
pub struct IndexCache {
    fetcher: Arc<dyn Fetcher>,
    ttl: Duration,
    state: RwLock<Option<CachedIndex>>,
}

impl IndexCache {
    /// Creates an empty cache; the first [`get`](Self::get) builds the index.
    pub fn new(fetcher: Arc<dyn Fetcher>, ttl: Duration) -> Self {
        Self {
            fetcher,
            ttl,
            state: RwLock::new(None),
        }
    }

    /// Returns the current index, rebuilding (lightweight) when the cached
    /// one is older than the TTL.
    pub async fn get(&self) -> Arc<DocsIndex> {
        self.get_at(Instant::now()).await
    }

    /// Clock-injected variant of [`get`](Self::get) for deterministic tests.
    pub async fn get_at(&self, now: Instant) -> Arc<DocsIndex> {
        {
            let state = self.state.read().await;
            if let Some(cached) = state.as_ref()
                && now.duration_since(cached.built_at) < self.ttl
            {
                return Arc::clone(&cached.index);
            }
        }

        debug!("index cache stale or empty; rebuilding");
        // Built outside the lock; a concurrent rebuild may race us and the
        // later write simply replaces the earlier complete index.
        let index = Arc::new(IndexBuilder::new(self.fetcher.as_ref()).build(true).await);
        let mut state = self.state.write().await;
        *state = Some(CachedIndex {
            index: Arc::clone(&index),
            built_at: now,
        });
        index
    }

    /// Forces the next [`get`](Self::get) to rebuild regardless of age.
    pub async fn invalidate(&self) {
        let mut state = self.state.write().await;
        *state = None;
    }
}
