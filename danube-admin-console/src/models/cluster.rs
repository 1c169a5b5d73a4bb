use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ClusterSnapshot {
    pub timestamp: String,
    #[serde(default)]
    pub brokers: Vec<BrokerSummary>,
    #[serde(default)]
    pub totals: ClusterTotals,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BrokerStats {
    pub topics_owned: u64,
    pub rpc_total: u64,
    pub rpc_rate_1m: f64,
    pub active_connections: u64,
    pub errors_5xx_total: u64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BrokerSummary {
    pub broker_id: String,
    pub broker_addr: String,
    pub broker_role: String,
    #[serde(default)]
    pub broker_status: String,
    #[serde(default)]
    pub stats: BrokerStats,
}

/// Aggregates as reported by the gateway. Never recomputed from `brokers`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ClusterTotals {
    pub broker_count: u64,
    pub topics_total: u64,
    pub rpc_total: u64,
    pub active_connections: u64,
}

impl BrokerSummary {
    pub fn role(&self) -> BrokerRole {
        BrokerRole::from(self.broker_role.as_str())
    }

    pub fn status(&self) -> BrokerStatus {
        BrokerStatus::from(self.broker_status.as_str())
    }
}

/// Broker role as displayed. Only the leader marker is interpreted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BrokerRole {
    Leader,
    Other(String),
}

impl From<&str> for BrokerRole {
    fn from(value: &str) -> Self {
        match value {
            "Cluster_Leader" => BrokerRole::Leader,
            other => BrokerRole::Other(other.to_string()),
        }
    }
}

impl fmt::Display for BrokerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrokerRole::Leader => f.write_str("leader"),
            BrokerRole::Other(role) if role.is_empty() => f.write_str("-"),
            BrokerRole::Other(role) => f.write_str(role),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BrokerStatus {
    Active,
    Draining,
    Drained,
    Other(String),
}

impl BrokerStatus {
    /// Whether the broker is out of topic assignment rotation.
    pub fn is_draining(&self) -> bool {
        matches!(self, BrokerStatus::Draining | BrokerStatus::Drained)
    }
}

impl From<&str> for BrokerStatus {
    fn from(value: &str) -> Self {
        match value {
            "active" => BrokerStatus::Active,
            "draining" => BrokerStatus::Draining,
            "drained" => BrokerStatus::Drained,
            other => BrokerStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for BrokerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrokerStatus::Active => f.write_str("active"),
            BrokerStatus::Draining => f.write_str("draining"),
            BrokerStatus::Drained => f.write_str("drained"),
            BrokerStatus::Other(status) if status.is_empty() => f.write_str("unknown"),
            BrokerStatus::Other(status) => f.write_str(status),
        }
    }
}
