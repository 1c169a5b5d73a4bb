//! Read-models: typed, cached projections of gateway responses.
//!
//! A [`ReadModel`] is a mounted observer of one cache key. It fetches when
//! created, refetches on its polling interval and whenever the key is
//! invalidated, and publishes a [`QueryState`] that views render from.

mod cache;
mod hooks;
mod series;

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, warn};

use crate::core::Result;

pub use cache::QueryCache;
pub use hooks::{
    broker_key, cluster_key, namespaces_key, topic_key, topics_list_key, ReadModels, BROKER_KEY,
    CLUSTER_PAGE_KEY, NAMESPACES_KEY, TOPICS_LIST_KEY, TOPIC_KEY,
};
pub use series::SeriesQuery;

/// Cache identity: a resource name, optionally parameterized by an id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryKey {
    resource: &'static str,
    id: Option<String>,
}

impl QueryKey {
    pub fn new(resource: &'static str) -> Self {
        Self { resource, id: None }
    }

    pub fn with_id(resource: &'static str, id: impl Into<String>) -> Self {
        Self {
            resource,
            id: Some(id.into()),
        }
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{}[{}]", self.resource, id),
            None => f.write_str(self.resource),
        }
    }
}

/// What a view renders from.
#[derive(Debug)]
pub enum QueryState<T> {
    /// No identifier yet, the fetch is suspended.
    Idle,
    Loading,
    Error(String),
    Success(Arc<T>),
}

impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        match self {
            QueryState::Idle => QueryState::Idle,
            QueryState::Loading => QueryState::Loading,
            QueryState::Error(e) => QueryState::Error(e.clone()),
            QueryState::Success(v) => QueryState::Success(Arc::clone(v)),
        }
    }
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn data(&self) -> Option<&Arc<T>> {
        match self {
            QueryState::Success(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Error(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct QueryOptions {
    /// Wall-clock polling period; `None` means fetch on demand only.
    pub refetch_interval: Option<Duration>,
    /// How long a cached value satisfies a new observer without a request.
    pub stale_time: Duration,
}

impl QueryOptions {
    pub fn on_demand() -> Self {
        Self::default()
    }

    pub fn polling(every: Duration, stale_time: Duration) -> Self {
        Self {
            refetch_interval: Some(every),
            stale_time,
        }
    }
}

/// A mounted read-model. Dropping it unmounts the observer; a fetch it
/// started keeps running and lands in the cache.
pub struct ReadModel<T> {
    key: Option<QueryKey>,
    state: watch::Receiver<QueryState<T>>,
    refetch: Option<mpsc::UnboundedSender<()>>,
    task: Option<JoinHandle<()>>,
}

enum Trigger {
    Interval,
    Invalidated,
    Manual,
}

impl<T: Send + Sync + 'static> ReadModel<T> {
    /// Mounts an observer for `key`. With no key the model stays [`QueryState::Idle`].
    pub fn spawn<F, Fut>(
        cache: QueryCache,
        key: Option<QueryKey>,
        options: QueryOptions,
        fetcher: F,
    ) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let Some(key) = key else {
            let (_, state) = watch::channel(QueryState::Idle);
            return Self {
                key: None,
                state,
                refetch: None,
                task: None,
            };
        };

        let (tx, state) = watch::channel(QueryState::Loading);
        let (refetch_tx, refetch_rx) = mpsc::unbounded_channel();
        // subscribe before the first fetch so no invalidation slips between them
        let invalidations = cache.subscribe();
        let task = tokio::spawn(observe(
            cache,
            key.clone(),
            options,
            fetcher,
            tx,
            invalidations,
            refetch_rx,
        ));

        Self {
            key: Some(key),
            state,
            refetch: Some(refetch_tx),
            task: Some(task),
        }
    }
}

impl<T> ReadModel<T> {
    pub fn key(&self) -> Option<&QueryKey> {
        self.key.as_ref()
    }

    pub fn is_enabled(&self) -> bool {
        self.key.is_some()
    }

    pub fn state(&self) -> QueryState<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryState<T>> {
        self.state.clone()
    }

    /// Asks for a network refetch regardless of freshness.
    pub fn refetch(&self) {
        if let Some(tx) = &self.refetch {
            let _ = tx.send(());
        }
    }

    /// Waits for the next published state.
    pub async fn changed(&mut self) -> Option<QueryState<T>> {
        self.state.changed().await.ok()?;
        Some(self.state.borrow_and_update().clone())
    }

    /// Waits until the model is out of its initial loading state.
    pub async fn settled(&mut self) -> QueryState<T> {
        if let Ok(state) = self.state.wait_for(|s| !s.is_loading()).await {
            return state.clone();
        }
        self.state.borrow().clone()
    }
}

impl<T> Drop for ReadModel<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn observe<T, F, Fut>(
    cache: QueryCache,
    key: QueryKey,
    options: QueryOptions,
    fetcher: F,
    tx: watch::Sender<QueryState<T>>,
    mut invalidations: broadcast::Receiver<QueryKey>,
    mut refetch_rx: mpsc::UnboundedReceiver<()>,
) where
    T: Send + Sync + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    let mut ticker = options.refetch_interval.map(|every| {
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + every, every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        interval
    });

    // mount
    let result = cache.fetch(&key, options.stale_time, &fetcher).await;
    publish(&key, &tx, result);

    loop {
        let trigger = tokio::select! {
            _ = tick(&mut ticker) => Trigger::Interval,
            event = invalidations.recv() => match event {
                Ok(invalidated) if invalidated == key => Trigger::Invalidated,
                Ok(_) => continue,
                // missed events may have included ours
                Err(broadcast::error::RecvError::Lagged(_)) => Trigger::Invalidated,
                Err(broadcast::error::RecvError::Closed) => return,
            },
            cmd = refetch_rx.recv() => match cmd {
                Some(()) => Trigger::Manual,
                None => return,
            },
        };

        match trigger {
            Trigger::Interval => debug!(target: "console", "polling {}", key),
            Trigger::Invalidated => debug!(target: "console", "refetching invalidated {}", key),
            Trigger::Manual => debug!(target: "console", "manual refetch of {}", key),
        }

        let result = cache.refetch(&key, &fetcher).await;
        publish(&key, &tx, result);
    }
}

async fn tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

fn publish<T>(key: &QueryKey, tx: &watch::Sender<QueryState<T>>, result: Result<Arc<T>>) {
    match result {
        Ok(value) => {
            tx.send_replace(QueryState::Success(value));
        }
        Err(e) if e.is_cancelled() => {}
        Err(e) => {
            warn!(target: "console", "read-model {} failed: {}", key, e);
            tx.send_replace(QueryState::Error(e.message()));
        }
    }
}

#[cfg(test)]
mod read_model_test;
