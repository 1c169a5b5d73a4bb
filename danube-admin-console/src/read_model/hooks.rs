use std::time::Duration;

use super::{QueryCache, QueryKey, QueryOptions, ReadModel, SeriesQuery};
use crate::core::GatewayClient;
use crate::models::{BrokerDetail, ClusterSnapshot, NamespacesResponse, TopicDetail, TopicsList};

pub const CLUSTER_PAGE_KEY: &str = "clusterPage";
pub const BROKER_KEY: &str = "broker";
pub const TOPICS_LIST_KEY: &str = "topicsList";
pub const TOPIC_KEY: &str = "topic";
pub const NAMESPACES_KEY: &str = "namespacesList";

const TOPIC_POLL: Duration = Duration::from_secs(5);
const TOPIC_STALE: Duration = Duration::from_secs(3);
const NAMESPACES_POLL: Duration = Duration::from_secs(10);
const NAMESPACES_STALE: Duration = Duration::from_secs(5);

pub fn cluster_key() -> QueryKey {
    QueryKey::new(CLUSTER_PAGE_KEY)
}

pub fn broker_key(broker_id: &str) -> QueryKey {
    QueryKey::with_id(BROKER_KEY, broker_id)
}

pub fn topics_list_key() -> QueryKey {
    QueryKey::new(TOPICS_LIST_KEY)
}

pub fn topic_key(topic: &str) -> QueryKey {
    QueryKey::with_id(TOPIC_KEY, topic)
}

pub fn namespaces_key() -> QueryKey {
    QueryKey::new(NAMESPACES_KEY)
}

/// Entry point for mounting read-models: the gateway client plus the
/// shared cache every model of this session goes through.
#[derive(Clone)]
pub struct ReadModels {
    client: GatewayClient,
    cache: QueryCache,
}

impl ReadModels {
    pub fn new(client: GatewayClient, cache: QueryCache) -> Self {
        Self { client, cache }
    }

    pub fn client(&self) -> &GatewayClient {
        &self.client
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Cluster overview, refreshed only through invalidation.
    pub fn cluster(&self) -> ReadModel<ClusterSnapshot> {
        let client = self.client.clone();
        ReadModel::spawn(
            self.cache.clone(),
            Some(cluster_key()),
            QueryOptions::on_demand(),
            move || {
                let client = client.clone();
                async move { client.cluster_page().await }
            },
        )
    }

    /// Broker detail, refreshed only through invalidation. Idle without an id.
    pub fn broker(&self, broker_id: Option<&str>) -> ReadModel<BrokerDetail> {
        let key = non_empty(broker_id).map(broker_key);
        let id = key.as_ref().and_then(|k| k.id()).unwrap_or_default().to_string();
        let client = self.client.clone();
        ReadModel::spawn(
            self.cache.clone(),
            key,
            QueryOptions::on_demand(),
            move || {
                let client = client.clone();
                let id = id.clone();
                async move { client.broker_page(&id).await }
            },
        )
    }

    /// Broker-grouped topics flattened into table rows, polled every 5s.
    pub fn topics(&self) -> ReadModel<TopicsList> {
        let client = self.client.clone();
        ReadModel::spawn(
            self.cache.clone(),
            Some(topics_list_key()),
            QueryOptions::polling(TOPIC_POLL, TOPIC_STALE),
            move || {
                let client = client.clone();
                async move { client.topics().await.map(TopicsList::from) }
            },
        )
    }

    /// Topic detail, polled every 5s. Idle without a topic name.
    pub fn topic(&self, topic: Option<&str>) -> ReadModel<TopicDetail> {
        let key = non_empty(topic).map(topic_key);
        let name = key.as_ref().and_then(|k| k.id()).unwrap_or_default().to_string();
        let client = self.client.clone();
        ReadModel::spawn(
            self.cache.clone(),
            key,
            QueryOptions::polling(TOPIC_POLL, TOPIC_STALE),
            move || {
                let client = client.clone();
                let name = name.clone();
                async move { client.topic_page(&name).await }
            },
        )
    }

    /// Namespaces with topics and policies, polled every 10s.
    pub fn namespaces(&self) -> ReadModel<NamespacesResponse> {
        let client = self.client.clone();
        ReadModel::spawn(
            self.cache.clone(),
            Some(namespaces_key()),
            QueryOptions::polling(NAMESPACES_POLL, NAMESPACES_STALE),
            move || {
                let client = client.clone();
                async move { client.namespaces().await }
            },
        )
    }

    /// Time series for one topic. Not cached; see [`SeriesQuery`].
    pub fn series(&self, topic: &str) -> SeriesQuery {
        SeriesQuery::new(self.client.clone(), topic)
    }
}

fn non_empty(id: Option<&str>) -> Option<&str> {
    id.map(str::trim).filter(|s| !s.is_empty())
}
