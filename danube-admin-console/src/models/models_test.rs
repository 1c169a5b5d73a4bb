#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::models::namespaces::{is_partition, topic_path};
    use crate::models::{
        align_two, BrokerRole, BrokerStatus, DeliveryMode, NamespaceInfo, PolicyEntry, SchemaTag,
        Series, TopicDetail, TopicsList, TopicsResponse,
    };

    /// Test: Topic list flattening
    ///
    /// Purpose
    /// - The broker grouped payload becomes one row per (broker, topic)
    ///
    /// Flow
    /// - Two brokers with two topics each, one name present on both
    ///
    /// Expected
    /// - Four rows in payload order with `{broker_id}:{topic}` ids
    /// - The colliding topic name is kept twice
    #[test]
    fn test_topics_are_flattened_per_broker() {
        let resp: TopicsResponse = serde_json::from_value(json!({
            "timestamp": "t",
            "brokers": [
                {"broker": {"broker_id": "b1", "broker_addr": "a1", "broker_role": "Cluster_Leader"},
                 "topics": [{"name": "/default/a", "delivery": "Reliable", "producers_connected": 2},
                            {"name": "/default/shared"}]},
                {"broker": {"broker_id": "b2", "broker_addr": "a2", "broker_role": "Cluster_Follower"},
                 "topics": [{"name": "/default/shared", "consumers_connected": 1, "subscriptions": 1},
                            {"name": "/default/c"}]}
            ],
            "errors": []
        }))
        .unwrap();

        let list = TopicsList::from(resp);
        let ids: Vec<&str> = list.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["b1:/default/a", "b1:/default/shared", "b2:/default/shared", "b2:/default/c"]
        );
        assert_eq!(list.rows[0].delivery, DeliveryMode::Reliable);
        assert_eq!(list.rows[0].producers, 2);
        assert_eq!(list.rows[1].delivery, DeliveryMode::NonReliable);
        assert_eq!(list.rows[2].consumers, 1);
        assert_eq!(list.rows[2].broker_id, "b2");
    }

    #[test]
    fn test_schema_decoding() {
        let mut detail: TopicDetail = serde_json::from_value(json!({
            "timestamp": "t",
            "topic": {"name": "/default/t", "type_schema": 3, "schema_data": "eyJ0eXBlIjoib2JqZWN0In0="}
        }))
        .unwrap();
        assert_eq!(detail.topic.type_schema, SchemaTag::Code(3));
        assert_eq!(detail.decoded_schema().as_deref(), Ok(r#"{"type":"object"}"#));

        detail.topic.schema_data = "not base64!".into();
        assert_eq!(detail.decoded_schema(), Err("Invalid base64 string".to_string()));

        // valid base64, invalid utf-8
        detail.topic.schema_data = "//79".into();
        assert_eq!(detail.decoded_schema(), Err("Invalid base64 string".to_string()));

        let named: TopicDetail = serde_json::from_value(json!({
            "timestamp": "t",
            "topic": {"name": "/default/t", "type_schema": "Json"}
        }))
        .unwrap();
        assert_eq!(named.topic.type_schema, SchemaTag::Name("Json".into()));
        assert!(named.metrics.reliable.is_none());
    }

    #[test]
    fn test_partition_detection() {
        assert!(is_partition("/default/orders-part-0"));
        assert!(is_partition("orders-part-12"));
        assert!(!is_partition("/default/orders"));
        assert!(!is_partition("/default/orders-part-"));
        assert!(!is_partition("/default/orders-part-1a"));

        let ns = NamespaceInfo {
            name: "default".into(),
            topics: vec![
                "/default/orders".into(),
                "/default/p-part-0".into(),
                "/default/p-part-1".into(),
            ],
            policies: String::new(),
        };
        assert_eq!(ns.normal_topics(), vec!["/default/orders"]);
        assert_eq!(ns.partitioned_topics(), vec!["/default/p-part-0", "/default/p-part-1"]);
    }

    #[test]
    fn test_policy_entries() {
        let mut ns = NamespaceInfo {
            name: "default".into(),
            topics: vec![],
            policies: r#"{"max_producers_per_topic": 0, "retention": "7d"}"#.into(),
        };
        assert_eq!(
            ns.policy_entries(),
            Ok(vec![
                PolicyEntry {
                    key: "max_producers_per_topic".into(),
                    value: "0".into()
                },
                PolicyEntry {
                    key: "retention".into(),
                    value: "7d".into()
                },
            ])
        );

        ns.policies = "  ".into();
        assert_eq!(ns.policy_entries(), Ok(vec![]));

        let whole = |value: &str| {
            Ok(vec![PolicyEntry {
                key: String::new(),
                value: value.into(),
            }])
        };
        ns.policies = "[1, 2]".into();
        assert_eq!(ns.policy_entries(), whole("[1,2]"));
        ns.policies = "null".into();
        assert_eq!(ns.policy_entries(), whole("null"));
        ns.policies = "42".into();
        assert_eq!(ns.policy_entries(), whole("42"));
        ns.policies = r#""open""#.into();
        assert_eq!(ns.policy_entries(), whole(r#""open""#));

        ns.policies = "{broken".into();
        assert_eq!(ns.policy_entries(), Err("Invalid policies JSON".to_string()));
    }

    #[test]
    fn test_topic_path() {
        assert_eq!(topic_path("default/orders"), "/default/orders");
        assert_eq!(topic_path("/default/orders"), "/default/orders");
    }

    #[test]
    fn test_align_two_unions_timestamps() {
        let a = Series {
            name: "publish_rate_1m".into(),
            labels: None,
            points: vec![(10, 1.0), (30, 3.0)],
        };
        let b = Series {
            name: "dispatch_rate_1m".into(),
            labels: None,
            points: vec![(20, 2.0), (30, 4.0)],
        };

        let aligned = align_two(Some(&a), Some(&b));
        assert_eq!(aligned.timestamps, vec![10, 20, 30]);
        assert_eq!(aligned.left, vec![Some(1.0), None, Some(3.0)]);
        assert_eq!(aligned.right, vec![None, Some(2.0), Some(4.0)]);

        let one_sided = align_two(None, Some(&b));
        assert_eq!(one_sided.left, vec![None, None]);
        assert!(align_two(None, None).is_empty());
    }

    #[test]
    fn test_broker_display_mapping() {
        assert_eq!(BrokerRole::from("Cluster_Leader").to_string(), "leader");
        assert_eq!(BrokerRole::from("Cluster_Follower").to_string(), "Cluster_Follower");
        assert_eq!(BrokerStatus::from("drained"), BrokerStatus::Drained);
        assert!(BrokerStatus::from("draining").is_draining());
        assert_eq!(BrokerStatus::from("booting").to_string(), "booting");
        assert_eq!(BrokerStatus::from("").to_string(), "unknown");
    }

    #[test]
    fn test_unknown_delivery_mode_round_trips_verbatim() {
        let mode: DeliveryMode = serde_json::from_value(json!("Exotic")).unwrap();
        assert_eq!(mode, DeliveryMode::Other("Exotic".into()));
        assert_eq!(serde_json::to_value(&mode).unwrap(), json!("Exotic"));
    }
}
