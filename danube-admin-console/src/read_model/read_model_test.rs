#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use crate::core::GatewayError;
    use crate::read_model::{QueryCache, QueryKey, QueryOptions, QueryState, ReadModel};

    fn counter_model(
        cache: &QueryCache,
        key: Option<QueryKey>,
        options: QueryOptions,
        calls: &Arc<AtomicUsize>,
    ) -> ReadModel<usize> {
        let calls = Arc::clone(calls);
        ReadModel::spawn(cache.clone(), key, options, move || {
            let calls = Arc::clone(&calls);
            async move { Ok(calls.fetch_add(1, Ordering::SeqCst) + 1) }
        })
    }

    async fn next_value(model: &mut ReadModel<usize>) -> usize {
        let state = tokio::time::timeout(Duration::from_secs(2), model.changed())
            .await
            .expect("state change")
            .expect("model still mounted");
        **state.data().expect("success state")
    }

    /// Test: A model without an identifier stays idle
    ///
    /// Purpose
    /// - Detail views with no broker/topic selected must not issue requests
    ///
    /// Expected
    /// - State is Idle, the fetcher never runs, refetch is a no-op
    #[tokio::test]
    async fn test_disabled_model_is_idle() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let model = counter_model(&cache, None, QueryOptions::on_demand(), &calls);

        model.refetch();
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert!(!model.is_enabled());
        assert!(matches!(model.state(), QueryState::Idle));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_mount_fetches_once() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let mut model = counter_model(
            &cache,
            Some(QueryKey::new("clusterPage")),
            QueryOptions::on_demand(),
            &calls,
        );

        let state = model.settled().await;
        assert_eq!(state.data().map(|v| **v), Some(1));

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    /// Test: Invalidation refetches every mounted observer of the key
    ///
    /// Flow
    /// - Mount two models on the same key and one on another key
    /// - Invalidate the shared key
    ///
    /// Expected
    /// - Both observers of the key see the refetched value
    /// - The unrelated model is untouched
    #[tokio::test]
    async fn test_invalidation_refetches_observers() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let other_calls = Arc::new(AtomicUsize::new(0));
        let key = QueryKey::new("topicsList");

        let mut a = counter_model(&cache, Some(key.clone()), QueryOptions::on_demand(), &calls);
        a.settled().await;
        let mut b = counter_model(
            &cache,
            Some(key.clone()),
            QueryOptions::polling(Duration::from_secs(60), Duration::from_secs(60)),
            &calls,
        );
        assert_eq!(b.settled().await.data().map(|v| **v), Some(1));

        let mut other = counter_model(
            &cache,
            Some(QueryKey::new("clusterPage")),
            QueryOptions::on_demand(),
            &other_calls,
        );
        other.settled().await;

        cache.invalidate(&key);

        assert!(next_value(&mut a).await >= 2);
        assert!(next_value(&mut b).await >= 2);
        assert_eq!(other_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_polling_refetches_on_interval() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let mut model = counter_model(
            &cache,
            Some(QueryKey::with_id("topic", "/default/orders")),
            QueryOptions::polling(Duration::from_millis(40), Duration::ZERO),
            &calls,
        );

        model.settled().await;
        assert_eq!(next_value(&mut model).await, 2);
        assert_eq!(next_value(&mut model).await, 3);
    }

    #[tokio::test]
    async fn test_manual_refetch() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let mut model = counter_model(
            &cache,
            Some(QueryKey::with_id("broker", "1")),
            QueryOptions::on_demand(),
            &calls,
        );

        model.settled().await;
        model.refetch();
        assert_eq!(next_value(&mut model).await, 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_publishes_error_message() {
        let cache = QueryCache::new();
        let mut model: ReadModel<usize> = ReadModel::spawn(
            cache,
            Some(QueryKey::new("clusterPage")),
            QueryOptions::on_demand(),
            || async {
                Err(GatewayError::Status {
                    status: 502,
                    message: "leader unreachable".into(),
                })
            },
        );

        let state = model.settled().await;
        assert_eq!(state.error(), Some("leader unreachable"));
    }

    #[test]
    fn test_query_key_display() {
        assert_eq!(QueryKey::new("clusterPage").to_string(), "clusterPage");
        assert_eq!(
            QueryKey::with_id("topic", "/default/orders").to_string(),
            "topic[/default/orders]"
        );
    }
}
