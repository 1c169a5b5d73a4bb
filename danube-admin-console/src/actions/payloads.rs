use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Body of `POST /ui/v1/topics/actions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TopicActionRequest {
    Create {
        topic: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        namespace: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        partitions: Option<u32>,
        schema_type: SchemaType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        schema_data: Option<String>,
        dispatch_strategy: DispatchStrategy,
    },
    Unload {
        topic: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        namespace: Option<String>,
    },
    Delete {
        topic: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        namespace: Option<String>,
    },
}

impl TopicActionRequest {
    pub fn name(&self) -> &'static str {
        match self {
            TopicActionRequest::Create { .. } => "create",
            TopicActionRequest::Unload { .. } => "unload",
            TopicActionRequest::Delete { .. } => "delete",
        }
    }

    pub fn topic(&self) -> &str {
        match self {
            TopicActionRequest::Create { topic, .. }
            | TopicActionRequest::Unload { topic, .. }
            | TopicActionRequest::Delete { topic, .. } => topic,
        }
    }
}

/// Body of `POST /ui/v1/cluster/actions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClusterActionRequest {
    Unload {
        broker_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_parallel: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        namespaces_include: Option<Vec<String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        namespaces_exclude: Option<Vec<String>>,
        /// only ever sent as `true`
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        dry_run: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timeout_seconds: Option<u64>,
    },
    Activate {
        broker_id: String,
        reason: String,
    },
}

impl ClusterActionRequest {
    pub fn name(&self) -> &'static str {
        match self {
            ClusterActionRequest::Unload { .. } => "unload",
            ClusterActionRequest::Activate { .. } => "activate",
        }
    }

    pub fn broker_id(&self) -> &str {
        match self {
            ClusterActionRequest::Unload { broker_id, .. }
            | ClusterActionRequest::Activate { broker_id, .. } => broker_id,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaType {
    #[default]
    String,
    Bytes,
    Int64,
    Json,
}

impl SchemaType {
    pub const ALL: [SchemaType; 4] = [
        SchemaType::String,
        SchemaType::Bytes,
        SchemaType::Int64,
        SchemaType::Json,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::String => "String",
            SchemaType::Bytes => "Bytes",
            SchemaType::Int64 => "Int64",
            SchemaType::Json => "Json",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchemaType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown schema type '{}' (String, Bytes, Int64, Json)", s))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStrategy {
    #[default]
    NonReliable,
    Reliable,
}

impl DispatchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchStrategy::NonReliable => "non_reliable",
            DispatchStrategy::Reliable => "reliable",
        }
    }
}

impl fmt::Display for DispatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DispatchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "non_reliable" | "non-reliable" => Ok(DispatchStrategy::NonReliable),
            "reliable" => Ok(DispatchStrategy::Reliable),
            other => Err(format!(
                "unknown dispatch strategy '{}' (non_reliable, reliable)",
                other
            )),
        }
    }
}

/// Namespace to send alongside `topic`.
///
/// A topic that already starts with `/` is fully qualified and never carries
/// one; otherwise a non-blank namespace is attached.
pub fn qualify(topic: &str, namespace: &str) -> Option<String> {
    if topic.trim_start().starts_with('/') {
        return None;
    }
    let namespace = namespace.trim();
    (!namespace.is_empty()).then(|| namespace.to_string())
}
