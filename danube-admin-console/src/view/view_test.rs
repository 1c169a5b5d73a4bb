#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::actions::Notification;
    use crate::models::{ClusterSnapshot, NamespacesResponse, TimeSeriesSet, TopicDetail};
    use crate::read_model::QueryState;
    use crate::view::{
        render_cluster, render_namespaces, render_notification, render_series, render_state,
        render_topic,
    };

    fn cluster_with_warning() -> ClusterSnapshot {
        serde_json::from_value(json!({
            "timestamp": "2025-01-01T00:00:00Z",
            "brokers": [
                {
                    "broker_id": "1001",
                    "broker_addr": "10.0.0.1:6650",
                    "broker_role": "Cluster_Leader",
                    "broker_status": "active",
                    "stats": {"topics_owned": 3, "rpc_total": 10, "rpc_rate_1m": 0.5,
                              "active_connections": 2, "errors_5xx_total": 0}
                },
                {
                    "broker_id": "1002",
                    "broker_addr": "10.0.0.2:6650",
                    "broker_role": "Cluster_Follower",
                    "broker_status": "draining",
                    "stats": {"topics_owned": 1, "rpc_total": 4, "rpc_rate_1m": 0.1,
                              "active_connections": 1, "errors_5xx_total": 1}
                }
            ],
            "totals": {"broker_count": 3, "topics_total": 4, "rpc_total": 14, "active_connections": 3},
            "errors": ["broker x unreachable"]
        }))
        .unwrap()
    }

    /// Test: Partial success renders warnings and the full table
    ///
    /// Purpose
    /// - A payload with `errors[]` is not an all-or-nothing failure
    ///
    /// Expected
    /// - Warning banner first, then every broker row
    /// - Totals shown as reported, not recomputed from the rows
    #[test]
    fn test_partial_success_renders_warning_and_brokers() {
        let state = QueryState::Success(Arc::new(cluster_with_warning()));
        let text = render_state(&state, render_cluster);

        assert!(text.starts_with("[warning] broker x unreachable\n"));
        assert!(text.contains("1001"));
        assert!(text.contains("1002"));
        assert!(text.contains("leader"));
        assert!(!text.contains("Cluster_Leader"));
        assert!(text.contains("draining"));
        assert!(text.contains(&format!("  {:<28} {}", "Brokers", 3)));
    }

    #[test]
    fn test_error_state_is_a_single_banner() {
        let state: QueryState<ClusterSnapshot> = QueryState::Error("connection refused".into());
        assert_eq!(render_state(&state, render_cluster), "[error] connection refused\n");

        let idle: QueryState<ClusterSnapshot> = QueryState::Idle;
        assert!(!render_state(&idle, render_cluster).contains("error"));
    }

    #[test]
    fn test_topic_schema_field_error_keeps_page() {
        let detail: TopicDetail = serde_json::from_value(json!({
            "timestamp": "t",
            "topic": {"name": "/default/orders", "type_schema": 0, "schema_data": "%%%",
                      "subscriptions": ["s1"]},
            "metrics": {"core": {"msg_in_total": 42}}
        }))
        .unwrap();
        let text = render_topic(&detail);
        assert!(text.contains("<Invalid base64 string>"));
        assert!(text.contains("42"));
        assert!(text.contains("s1"));
        assert!(!text.contains("Reliable delivery"));
    }

    #[test]
    fn test_reliable_section_only_when_present() {
        let detail: TopicDetail = serde_json::from_value(json!({
            "timestamp": "t",
            "topic": {"name": "/default/wal", "schema_data": "eyJhIjoxfQ=="},
            "metrics": {"reliable": {"wal_append_total": 9}}
        }))
        .unwrap();
        let text = render_topic(&detail);
        assert!(text.contains("Reliable delivery"));
        assert!(text.contains(r#"{"a":1}"#));
    }

    #[test]
    fn test_namespaces_split_links_and_policies() {
        let resp: NamespacesResponse = serde_json::from_value(json!({
            "timestamp": "t",
            "namespaces": [
                {"name": "default", "topics": ["default/orders", "/default/p-part-0", "/default/p-part-1"],
                 "policies": "{\"max_producers_per_topic\":0}"},
                {"name": "broken", "topics": [], "policies": "{not json"},
                {"name": "listed", "topics": [], "policies": "[\"a\"]"}
            ]
        }))
        .unwrap();
        let text = render_namespaces(&resp);
        assert!(text.contains("default (1 topics, 2 partitions)"));
        assert!(text.contains("    /default/orders"));
        assert!(text.contains("max_producers_per_topic: 0"));
        assert!(text.contains("<Invalid policies JSON>"));
        assert!(text.contains("  Policies:\n    [\"a\"]\n"));
    }

    #[test]
    fn test_series_pairs_fill_missing_points() {
        let set: TimeSeriesSet = serde_json::from_value(json!({
            "series": [
                {"name": "publish_rate_1m", "points": [[60, 1.0], [120, 2.0]]},
                {"name": "dispatch_rate_1m", "points": [[120, 3.0]]},
                {"name": "producer_send_errors", "labels": {"code": "timeout"}, "points": [[60, 4.0]]}
            ]
        }))
        .unwrap();
        let text = render_series(&set);
        assert!(text.contains("Publish vs Dispatch rate (1m)"));
        assert!(text.contains("1.00"));
        assert!(text.contains(&format!("{:>18} {:>18}", "1.00", "-")));
        assert!(text.contains("{code=timeout} latest 4.00"));
        assert!(text.contains("(no data)"));
    }

    #[test]
    fn test_notification_rendering() {
        assert_eq!(render_notification(&Notification::success("Created")), "[ok] Created\n");
        assert_eq!(render_notification(&Notification::error("boom")), "[error] boom\n");
    }
}
