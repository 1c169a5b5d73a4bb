#[cfg(test)]
mod tests {
    use crate::actions::{
        ClusterActions, DialogState, Notification, Severity, TopicActions, TopicTarget,
        NOTIFICATION_TTL,
    };
    use crate::core::{GatewayClient, GatewayClientConfig};
    use crate::read_model::{broker_key, cluster_key, topics_list_key, QueryCache};

    /// Nothing listens on port 1; every request fails at connect time.
    fn unreachable_client() -> GatewayClient {
        GatewayClient::new(GatewayClientConfig::new("http://127.0.0.1:1")).unwrap()
    }

    #[test]
    fn test_dialog_transitions() {
        let mut actions = TopicActions::new(unreachable_client(), QueryCache::new());
        assert_eq!(actions.unload_dialog(), &DialogState::Closed);

        actions.open_unload("orders");
        assert!(actions.unload_dialog().is_open());
        assert!(actions.unload_dialog().params().unwrap().needs_namespace());
        actions.unload_target_mut().unwrap().namespace = "billing".into();
        assert_eq!(
            actions.unload_dialog().params(),
            Some(&TopicTarget {
                topic: "orders".into(),
                namespace: "billing".into()
            })
        );

        actions.close_unload();
        assert!(!actions.unload_dialog().is_open());
        assert!(actions.unload_target_mut().is_none());

        actions.open_create();
        assert_eq!(actions.create_dialog().params().unwrap().schema_data, "{}");
    }

    #[test]
    fn test_invalidate_keys_include_own_key_first() {
        let topics = TopicActions::with_invalidate_keys(
            unreachable_client(),
            QueryCache::new(),
            vec![broker_key("3")],
        );
        assert_eq!(topics.invalidate_keys(), &[topics_list_key(), broker_key("3")]);

        let cluster = ClusterActions::new(unreachable_client(), QueryCache::new());
        assert_eq!(cluster.invalidate_keys(), &[cluster_key()]);
    }

    /// Test: Invalid form input never reaches the gateway
    ///
    /// Flow
    /// - Open the create dialog with non-numeric partitions and submit
    ///
    /// Expected
    /// - Error notification naming the field, dialog still open
    /// - No key invalidated
    #[tokio::test]
    async fn test_invalid_number_is_rejected_before_sending() {
        let cache = QueryCache::new();
        let mut actions = TopicActions::new(unreachable_client(), cache.clone());
        actions.open_create();
        {
            let form = actions.create_form_mut().unwrap();
            form.topic = "orders".into();
            form.partitions = "many".into();
        }

        assert!(!actions.submit_create().await);

        let note = actions.notification().unwrap();
        assert_eq!(note.severity, Severity::Error);
        assert!(note.message.contains("partitions"));
        assert!(actions.create_dialog().is_open());
        assert!(!cache.is_invalidated(&topics_list_key()));
    }

    #[tokio::test]
    async fn test_submit_without_open_dialog() {
        let mut actions = ClusterActions::new(unreachable_client(), QueryCache::new());
        assert!(!actions.submit_activate().await);
        assert_eq!(
            actions.notification().map(|n| n.message.as_str()),
            Some("the activate dialog is not open")
        );
    }

    /// Test: Transport failure keeps the dialog open and the cache intact
    ///
    /// Expected
    /// - Error notification, unload dialog still open with its draft
    /// - Subscribers see no invalidation
    #[tokio::test]
    async fn test_transport_failure_keeps_dialog_open() {
        let cache = QueryCache::new();
        let mut events = cache.subscribe();
        let mut actions = ClusterActions::with_invalidate_keys(
            unreachable_client(),
            cache.clone(),
            vec![broker_key("9")],
        );

        actions.open_unload("9");
        actions.unload_form_mut().unwrap().max_parallel = "2".into();
        assert!(!actions.submit_unload().await);

        let note = actions.notification().unwrap();
        assert!(!note.is_success());
        assert!(!note.message.is_empty());
        assert_eq!(
            actions.unload_dialog().params().map(|f| f.max_parallel.as_str()),
            Some("2")
        );
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_notification_expiry_and_dismiss() {
        let mut actions = TopicActions::new(unreachable_client(), QueryCache::new());
        assert!(!actions.submit_delete().await);

        let note = actions.notification().unwrap().clone();
        let ttl = note.expires_at.duration_since(tokio::time::Instant::now());
        assert!(ttl <= NOTIFICATION_TTL);
        assert!(!note.is_expired());

        actions.dismiss_notification();
        assert!(actions.notification().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_notification_expires_after_ttl() {
        let note = Notification::success("Created");
        assert!(!note.is_expired());

        tokio::time::advance(NOTIFICATION_TTL - std::time::Duration::from_millis(1)).await;
        assert!(!note.is_expired());

        tokio::time::advance(std::time::Duration::from_millis(1)).await;
        assert!(note.is_expired());
    }
}
