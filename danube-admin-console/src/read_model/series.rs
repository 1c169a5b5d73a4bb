use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::QueryState;
use crate::core::GatewayClient;
use crate::models::{SeriesRange, TimeSeriesSet};

/// Time-series query for one topic.
///
/// Unlike the cached read-models, only the latest range matters here:
/// setting a new range cancels the request still in flight, and a response
/// that belongs to an older range is discarded without touching the state.
pub struct SeriesQuery {
    client: GatewayClient,
    topic: String,
    range: Option<SeriesRange>,
    tx: Arc<watch::Sender<QueryState<TimeSeriesSet>>>,
    state: watch::Receiver<QueryState<TimeSeriesSet>>,
    current: Option<CancellationToken>,
    generation: Arc<Mutex<u64>>,
}

impl SeriesQuery {
    pub fn new(client: GatewayClient, topic: impl Into<String>) -> Self {
        let (tx, state) = watch::channel(QueryState::Idle);
        Self {
            client,
            topic: topic.into(),
            range: None,
            tx: Arc::new(tx),
            state,
            current: None,
            generation: Arc::new(Mutex::new(0)),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn range(&self) -> Option<&SeriesRange> {
        self.range.as_ref()
    }

    /// Starts a request for `range`, superseding any earlier one.
    pub fn set_range(&mut self, range: SeriesRange) {
        if let Some(token) = self.current.take() {
            token.cancel();
        }

        let generation = {
            let mut current = lock(&self.generation);
            *current += 1;
            *current
        };

        let token = CancellationToken::new();
        self.current = Some(token.clone());
        self.range = Some(range.clone());
        self.tx.send_replace(QueryState::Loading);

        let client = self.client.clone();
        let topic = self.topic.clone();
        let tx = Arc::clone(&self.tx);
        let latest = Arc::clone(&self.generation);

        debug!(
            target: "console",
            "series {} from={} to={} step={}", topic, range.from, range.to, range.step
        );

        tokio::spawn(async move {
            let result = tokio::select! {
                _ = token.cancelled() => {
                    debug!(target: "console", "series request for {} cancelled", topic);
                    return;
                }
                result = client.topic_series(&topic, &range) => result,
            };

            // checked under the lock so a newer range cannot slip in between
            let latest = lock(&latest);
            if *latest != generation || token.is_cancelled() {
                return;
            }
            match result {
                Ok(set) => {
                    tx.send_replace(QueryState::Success(Arc::new(set)));
                }
                Err(e) if e.is_cancelled() => {}
                Err(e) => {
                    warn!(target: "console", "series for {} failed: {}", topic, e);
                    tx.send_replace(QueryState::Error(e.message()));
                }
            }
        });
    }

    /// Re-requests the current range, if any.
    pub fn refresh(&mut self) {
        if let Some(range) = self.range.clone() {
            self.set_range(range);
        }
    }

    pub fn state(&self) -> QueryState<TimeSeriesSet> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryState<TimeSeriesSet>> {
        self.state.clone()
    }

    /// Waits until the latest request has produced a result.
    pub async fn settled(&mut self) -> QueryState<TimeSeriesSet> {
        if let Ok(state) = self.state.wait_for(|s| !s.is_loading()).await {
            return state.clone();
        }
        self.state.borrow().clone()
    }
}

impl Drop for SeriesQuery {
    fn drop(&mut self) {
        if let Some(token) = self.current.take() {
            token.cancel();
        }
    }
}

fn lock(generation: &Mutex<u64>) -> std::sync::MutexGuard<'_, u64> {
    // a poisoned counter is still a valid counter
    generation.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
