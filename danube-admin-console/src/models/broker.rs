use std::fmt;

use serde::{Deserialize, Serialize};

use super::cluster::{BrokerRole, BrokerStatus};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BrokerDetail {
    pub timestamp: String,
    pub broker: BrokerIdentity,
    #[serde(default)]
    pub metrics: BrokerMetrics,
    #[serde(default)]
    pub topics: Vec<BrokerTopic>,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BrokerIdentity {
    pub broker_id: String,
    pub broker_addr: String,
    pub broker_role: String,
    #[serde(default)]
    pub broker_status: String,
}

impl BrokerIdentity {
    pub fn role(&self) -> BrokerRole {
        BrokerRole::from(self.broker_role.as_str())
    }

    pub fn status(&self) -> BrokerStatus {
        BrokerStatus::from(self.broker_status.as_str())
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BrokerMetrics {
    pub rpc_total: u64,
    pub rpc_rate_1m: f64,
    pub topics_owned: u64,
    pub producers_connected: u64,
    pub consumers_connected: u64,
    pub inbound_bytes_total: u64,
    pub outbound_bytes_total: u64,
    pub errors_5xx_total: u64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BrokerTopic {
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

/// Topic delivery mode as reported by the gateway (`Reliable` / `NonReliable`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum DeliveryMode {
    Reliable,
    #[default]
    NonReliable,
    Other(String),
}

impl DeliveryMode {
    pub fn is_reliable(&self) -> bool {
        matches!(self, DeliveryMode::Reliable)
    }
}

impl From<String> for DeliveryMode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Reliable" => DeliveryMode::Reliable,
            "NonReliable" => DeliveryMode::NonReliable,
            _ => DeliveryMode::Other(value),
        }
    }
}

impl From<DeliveryMode> for String {
    fn from(value: DeliveryMode) -> Self {
        value.to_string()
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryMode::Reliable => f.write_str("Reliable"),
            DeliveryMode::NonReliable => f.write_str("NonReliable"),
            DeliveryMode::Other(mode) => f.write_str(mode),
        }
    }
}
