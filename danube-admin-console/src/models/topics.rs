use serde::{Deserialize, Serialize};

use super::broker::{BrokerIdentity, DeliveryMode};

/// Raw `/ui/v1/topics` payload: topics grouped under their owning broker.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TopicsResponse {
    pub timestamp: String,
    #[serde(default)]
    pub brokers: Vec<BrokerWithTopics>,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BrokerWithTopics {
    pub broker: BrokerIdentity,
    #[serde(default)]
    pub topics: Vec<BrokerTopicMini>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BrokerTopicMini {
    pub name: String,
    #[serde(default)]
    pub delivery: DeliveryMode,
    #[serde(default)]
    pub producers_connected: u64,
    #[serde(default)]
    pub consumers_connected: u64,
    #[serde(default)]
    pub subscriptions: u64,
}

/// One row of the cluster-wide topic table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TopicRow {
    /// `{broker_id}:{topic_name}`
    pub id: String,
    pub broker_id: String,
    pub name: String,
    pub delivery: DeliveryMode,
    pub producers: u64,
    pub subscriptions: u64,
    pub consumers: u64,
}

/// Flattened read-model of the topic list.
#[derive(Clone, Debug, Serialize)]
pub struct TopicsList {
    pub timestamp: String,
    pub rows: Vec<TopicRow>,
    pub errors: Vec<String>,
}

impl From<TopicsResponse> for TopicsList {
    /// One row per (broker, topic) pair, in payload order. Topics with the
    /// same name on different brokers stay separate rows.
    fn from(resp: TopicsResponse) -> Self {
        let rows = resp
            .brokers
            .into_iter()
            .flat_map(|group| {
                let broker_id = group.broker.broker_id;
                group.topics.into_iter().map(move |t| TopicRow {
                    id: format!("{}:{}", broker_id, t.name),
                    broker_id: broker_id.clone(),
                    name: t.name,
                    delivery: t.delivery,
                    producers: t.producers_connected,
                    subscriptions: t.subscriptions,
                    consumers: t.consumers_connected,
                })
            })
            .collect();

        TopicsList {
            timestamp: resp.timestamp,
            rows,
            errors: resp.errors,
        }
    }
}
