use serde::{Deserialize, Serialize};

pub const INVALID_POLICIES: &str = "Invalid policies JSON";

const PARTITION_MARKER: &str = "-part-";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NamespacesResponse {
    pub timestamp: String,
    #[serde(default)]
    pub namespaces: Vec<NamespaceInfo>,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NamespaceInfo {
    pub name: String,
    #[serde(default)]
    pub topics: Vec<String>,
    /// JSON encoded policies, parsed only when displayed.
    #[serde(default)]
    pub policies: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyEntry {
    pub key: String,
    pub value: String,
}

impl NamespaceInfo {
    /// Topics that are not partitions of a partitioned topic.
    pub fn normal_topics(&self) -> Vec<&str> {
        self.topics
            .iter()
            .map(String::as_str)
            .filter(|t| !is_partition(t))
            .collect()
    }

    /// Partition topics, recognised by their `-part-<n>` suffix.
    pub fn partitioned_topics(&self) -> Vec<&str> {
        self.topics
            .iter()
            .map(String::as_str)
            .filter(|t| is_partition(t))
            .collect()
    }

    /// Flat `key: value` view of the policies document.
    ///
    /// A blank document is treated as `{}`. Valid JSON that is not an object
    /// comes back as a single entry with an empty key holding the document.
    /// Unparseable text is a field-level error rendered in place of the policies.
    pub fn policy_entries(&self) -> Result<Vec<PolicyEntry>, String> {
        let raw = if self.policies.trim().is_empty() {
            "{}"
        } else {
            self.policies.as_str()
        };
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|_| INVALID_POLICIES.to_string())?;

        let serde_json::Value::Object(object) = value else {
            return Ok(vec![PolicyEntry {
                key: String::new(),
                value: value.to_string(),
            }]);
        };

        Ok(object
            .iter()
            .map(|(k, v)| PolicyEntry {
                key: k.clone(),
                value: match v {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                },
            })
            .collect())
    }
}

/// True for names ending in `-part-<digits>`.
pub fn is_partition(topic: &str) -> bool {
    match topic.rsplit_once(PARTITION_MARKER) {
        Some((_, suffix)) => !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

/// Fully qualified topic path used to drill into a topic page.
pub fn topic_path(topic: &str) -> String {
    if topic.starts_with('/') {
        topic.to_string()
    } else {
        format!("/{}", topic)
    }
}
