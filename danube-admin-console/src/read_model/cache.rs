use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::broadcast;
use tracing::debug;

use super::QueryKey;
use crate::core::{GatewayError, Result};

type AnyValue = Arc<dyn Any + Send + Sync>;
type SharedFetch = Shared<BoxFuture<'static, std::result::Result<AnyValue, GatewayError>>>;

const INVALIDATION_CAPACITY: usize = 256;

#[derive(Default)]
struct CacheEntry {
    value: Option<AnyValue>,
    updated_at: Option<Instant>,
    error: Option<GatewayError>,
    invalidated: bool,
    generation: u64,
    in_flight: Option<SharedFetch>,
}

impl CacheEntry {
    fn is_fresh(&self, stale_time: Duration) -> bool {
        match (&self.value, self.updated_at) {
            (Some(_), Some(at)) => !self.invalidated && at.elapsed() < stale_time,
            _ => false,
        }
    }
}

/// Process-wide read-model cache keyed by [`QueryKey`].
///
/// Observers of the same key share one in-flight fetch and one cached
/// value. Fetches run on their own task, so a dropped observer never
/// cancels them; the result still lands in the cache. Mutations reach the
/// cache only through [`QueryCache::invalidate`].
#[derive(Clone)]
pub struct QueryCache {
    entries: Arc<DashMap<QueryKey, CacheEntry>>,
    invalidations: broadcast::Sender<QueryKey>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        let (invalidations, _) = broadcast::channel(INVALIDATION_CAPACITY);
        Self {
            entries: Arc::new(DashMap::new()),
            invalidations,
        }
    }

    /// Returns the cached value while it is younger than `stale_time` and not
    /// invalidated; otherwise joins the in-flight fetch or starts one.
    pub async fn fetch<T, F, Fut>(&self, key: &QueryKey, stale_time: Duration, fetcher: F) -> Result<Arc<T>>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        self.run(key, Some(stale_time), fetcher).await
    }

    /// Ignores freshness but still joins a fetch already in flight.
    pub async fn refetch<T, F, Fut>(&self, key: &QueryKey, fetcher: F) -> Result<Arc<T>>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        self.run(key, None, fetcher).await
    }

    async fn run<T, F, Fut>(&self, key: &QueryKey, freshness: Option<Duration>, fetcher: F) -> Result<Arc<T>>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let shared = {
            let mut entry = self.entries.entry(key.clone()).or_default();

            if let Some(stale_time) = freshness {
                if entry.is_fresh(stale_time) {
                    if let Some(value) = entry.value.clone() {
                        debug!(target: "console", "cache hit for {}", key);
                        return downcast(key, value);
                    }
                }
            }

            match entry.in_flight.clone() {
                Some(shared) => {
                    debug!(target: "console", "joining in-flight fetch for {}", key);
                    shared
                }
                None => {
                    let shared = self.spawn_fetch(key.clone(), entry.generation, fetcher());
                    entry.in_flight = Some(shared.clone());
                    shared
                }
            }
        };

        let value = shared.await?;
        downcast(key, value)
    }

    fn spawn_fetch<T, Fut>(&self, key: QueryKey, generation: u64, fut: Fut) -> SharedFetch
    where
        T: Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        debug!(target: "console", "fetching {}", key);
        let cache = self.clone();
        let handle = tokio::spawn(async move {
            let result = fut.await.map(|v| Arc::new(v) as AnyValue);
            cache.settle(&key, generation, &result);
            result
        });

        async move {
            handle
                .await
                .unwrap_or_else(|e| Err(GatewayError::Transport(format!("fetch task failed: {}", e))))
        }
        .boxed()
        .shared()
    }

    fn settle(&self, key: &QueryKey, generation: u64, result: &std::result::Result<AnyValue, GatewayError>) {
        let Some(mut entry) = self.entries.get_mut(key) else {
            return;
        };
        // An invalidation bumped the generation while this fetch was running:
        // the result predates the mutation and the slot belongs to a newer fetch.
        if entry.generation != generation {
            debug!(target: "console", "dropping superseded result for {}", key);
            return;
        }
        entry.in_flight = None;
        match result {
            Ok(value) => {
                entry.value = Some(value.clone());
                entry.updated_at = Some(Instant::now());
                entry.error = None;
                entry.invalidated = false;
            }
            Err(e) => {
                entry.error = Some(e.clone());
            }
        }
    }

    /// Marks the key stale and tells every mounted observer to refetch.
    pub fn invalidate(&self, key: &QueryKey) {
        if let Some(mut entry) = self.entries.get_mut(key) {
            entry.invalidated = true;
            entry.generation += 1;
            entry.in_flight = None;
        }
        debug!(target: "console", "invalidated {}", key);
        // no receivers just means nothing is mounted
        let _ = self.invalidations.send(key.clone());
    }

    pub fn invalidate_all<'a>(&self, keys: impl IntoIterator<Item = &'a QueryKey>) {
        for key in keys {
            self.invalidate(key);
        }
    }

    pub fn get<T: Send + Sync + 'static>(&self, key: &QueryKey) -> Option<Arc<T>> {
        let value = self.entries.get(key)?.value.clone()?;
        value.downcast::<T>().ok()
    }

    /// Last failure recorded for the key, cleared by the next success.
    pub fn last_error(&self, key: &QueryKey) -> Option<GatewayError> {
        self.entries.get(key)?.error.clone()
    }

    pub fn is_invalidated(&self, key: &QueryKey) -> bool {
        self.entries
            .get(key)
            .map(|e| e.invalidated)
            .unwrap_or(false)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<QueryKey> {
        self.invalidations.subscribe()
    }
}

fn downcast<T: Send + Sync + 'static>(key: &QueryKey, value: AnyValue) -> Result<Arc<T>> {
    value
        .downcast::<T>()
        .map_err(|_| GatewayError::Decode(format!("cached value for {} has an unexpected type", key)))
}
