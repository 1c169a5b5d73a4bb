use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

pub const INVALID_SCHEMA: &str = "Invalid base64 string";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TopicDetail {
    pub timestamp: String,
    pub topic: TopicInfo,
    #[serde(default)]
    pub metrics: TopicMetrics,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl TopicDetail {
    pub fn decoded_schema(&self) -> Result<String, String> {
        self.topic.decoded_schema()
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TopicInfo {
    pub name: String,
    #[serde(default)]
    pub type_schema: SchemaTag,
    /// base64 encoded schema descriptor
    #[serde(default)]
    pub schema_data: String,
    #[serde(default)]
    pub subscriptions: Vec<String>,
}

/// Schema type tag. Current gateways send a numeric flag, older ones a name.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SchemaTag {
    Code(i64),
    Name(String),
}

impl Default for SchemaTag {
    fn default() -> Self {
        SchemaTag::Code(0)
    }
}

impl fmt::Display for SchemaTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaTag::Code(code) => write!(f, "{}", code),
            SchemaTag::Name(name) => f.write_str(name),
        }
    }
}

impl TopicInfo {
    /// Decodes the schema payload for display.
    ///
    /// A malformed payload is a field-level problem, the caller renders the
    /// error text in place of the schema and keeps the rest of the page.
    pub fn decoded_schema(&self) -> Result<String, String> {
        let bytes = STANDARD
            .decode(self.schema_data.trim())
            .map_err(|_| INVALID_SCHEMA.to_string())?;
        String::from_utf8(bytes).map_err(|_| INVALID_SCHEMA.to_string())
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TopicMetrics {
    pub core: CoreCounters,
    pub active: ActiveEntities,
    pub rates: Rates,
    pub quality: ProducerQuality,
    pub latency_size: LatencyAndSize,
    /// Only present for topics using reliable (WAL backed) delivery.
    pub reliable: Option<ReliableMetrics>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CoreCounters {
    pub msg_in_total: u64,
    pub msg_out_total: u64,
    pub bytes_in_total: u64,
    pub bytes_out_total: u64,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ActiveEntities {
    pub producers: u64,
    pub consumers: u64,
    pub subscriptions: u64,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Rates {
    pub publish_rate_1m: f64,
    pub dispatch_rate_1m: f64,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ProducerQuality {
    pub send_ok_total: u64,
    pub send_error_total: u64,
    pub send_error_by_code: Vec<(String, u64)>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LatencyAndSize {
    pub send_latency_ms_p50: f64,
    pub send_latency_ms_p95: f64,
    pub send_latency_ms_p99: f64,
    pub msg_size_bytes_avg: f64,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ReliableMetrics {
    pub wal_append_total: u64,
    pub wal_append_bytes_total: u64,
    pub wal_fsync_total: u64,
    pub wal_flush_latency_ms_p50: f64,
    pub wal_flush_latency_ms_p95: f64,
    pub wal_flush_latency_ms_p99: f64,
    pub cloud_upload_bytes_total: u64,
    pub cloud_upload_objects_total: u64,
}
