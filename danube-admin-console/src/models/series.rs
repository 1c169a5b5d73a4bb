use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const PUBLISH_RATE: &str = "publish_rate_1m";
pub const DISPATCH_RATE: &str = "dispatch_rate_1m";
pub const BYTES_IN_RATE: &str = "bytes_in_rate_1m";
pub const BYTES_OUT_RATE: &str = "bytes_out_rate_1m";
pub const PRODUCER_SEND_ERRORS: &str = "producer_send_errors";

pub const DEFAULT_STEP: &str = "15s";

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TimeSeriesSet {
    #[serde(default)]
    pub series: Vec<Series>,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Series {
    pub name: String,
    #[serde(default)]
    pub labels: Option<HashMap<String, String>>,
    /// `[unix_seconds, value]` pairs
    #[serde(default)]
    pub points: Vec<(i64, f64)>,
}

impl TimeSeriesSet {
    pub fn find(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    /// All series sharing a name, e.g. one per error code.
    pub fn all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Series> {
        self.series.iter().filter(move |s| s.name == name)
    }

    pub fn align(&self, left: &str, right: &str) -> AlignedSeries {
        align_two(self.find(left), self.find(right))
    }
}

/// Two series on a shared, sorted timestamp axis.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AlignedSeries {
    pub timestamps: Vec<i64>,
    pub left: Vec<Option<f64>>,
    pub right: Vec<Option<f64>>,
}

impl AlignedSeries {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Merges two series by the union of their timestamps. A point missing on
/// one side is `None` there; either side may be absent altogether.
pub fn align_two(a: Option<&Series>, b: Option<&Series>) -> AlignedSeries {
    let to_map = |s: Option<&Series>| -> BTreeMap<i64, f64> {
        s.map(|s| s.points.iter().copied().collect())
            .unwrap_or_default()
    };
    let left = to_map(a);
    let right = to_map(b);

    let mut timestamps: Vec<i64> = left.keys().chain(right.keys()).copied().collect();
    timestamps.sort_unstable();
    timestamps.dedup();

    AlignedSeries {
        left: timestamps.iter().map(|t| left.get(t).copied()).collect(),
        right: timestamps.iter().map(|t| right.get(t).copied()).collect(),
        timestamps,
    }
}

/// Range query parameters for `/ui/v1/topics/{topic}/series`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeriesRange {
    /// unix seconds
    pub from: i64,
    /// unix seconds
    pub to: i64,
    /// duration string understood by the gateway, e.g. `15s`, `1m`
    pub step: String,
}

impl SeriesRange {
    pub fn new(from: i64, to: i64, step: impl Into<String>) -> Self {
        Self {
            from,
            to,
            step: step.into(),
        }
    }

    /// Window ending now.
    pub fn last(window: Duration, step: impl Into<String>) -> Self {
        let to = chrono::Utc::now().timestamp();
        let from = to - window.as_secs() as i64;
        Self::new(from, to, step)
    }
}

impl Default for SeriesRange {
    fn default() -> Self {
        Self::last(Duration::from_secs(15 * 60), DEFAULT_STEP)
    }
}
