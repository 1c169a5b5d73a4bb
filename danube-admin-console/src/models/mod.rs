//! Typed view models for the admin gateway `/ui/v1` payloads.
//!
//! The shapes mirror what the gateway serializes; every numeric field
//! defaults to zero so an older gateway that omits a counter still decodes.

pub mod broker;
pub mod cluster;
pub mod namespaces;
pub mod series;
pub mod topic;
pub mod topics;

pub use broker::{BrokerDetail, BrokerIdentity, BrokerMetrics, BrokerTopic, DeliveryMode};
pub use cluster::{
    BrokerRole, BrokerStats, BrokerStatus, BrokerSummary, ClusterSnapshot, ClusterTotals,
};
pub use namespaces::{NamespaceInfo, NamespacesResponse, PolicyEntry};
pub use series::{align_two, AlignedSeries, Series, SeriesRange, TimeSeriesSet};
pub use topic::{
    ActiveEntities, CoreCounters, LatencyAndSize, ProducerQuality, Rates, ReliableMetrics,
    SchemaTag, TopicDetail, TopicInfo, TopicMetrics,
};
pub use topics::{BrokerTopicMini, BrokerWithTopics, TopicRow, TopicsList, TopicsResponse};

/// Response body of both action endpoints.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize, PartialEq)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub leader_reachable: bool,
}

#[cfg(test)]
mod models_test;
