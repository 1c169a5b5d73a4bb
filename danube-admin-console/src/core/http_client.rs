use std::time::Duration;

use reqwest::{header, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;
use url::Url;

use super::config::GatewayClientConfig;
use super::errors::{GatewayError, Result};
use crate::models::{
    ActionResponse, BrokerDetail, ClusterSnapshot, Health, NamespacesResponse, SeriesRange,
    TimeSeriesSet, TopicDetail, TopicsResponse,
};

pub const CLUSTER_ACTIONS_PATH: &str = "/ui/v1/cluster/actions";
pub const TOPIC_ACTIONS_PATH: &str = "/ui/v1/topics/actions";

/// HTTP client for the admin gateway `/ui/v1` API.
///
/// One attempt per call, no retry. Every failure comes back as a
/// [`GatewayError`] whose message prefers what the server said.
#[derive(Clone, Debug)]
pub struct GatewayClient {
    base_url: String,
    http: reqwest::Client,
}

impl GatewayClient {
    pub fn new(config: GatewayClientConfig) -> Result<Self> {
        // Accept either full URL (http/https) or host:port; default to http if no scheme
        let base = config.base_url.trim();
        let base_url = if base.starts_with("http://") || base.starts_with("https://") {
            base.to_string()
        } else {
            format!("http://{}", base)
        };
        Url::parse(&base_url)?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let http = builder.build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves a gateway path (with an optional query string) against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}{}", self.base_url, path))?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        debug!(target: "console", "GET {}", url);
        let resp = self.http.get(url).send().await?;
        decode(resp).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!(target: "console", "POST {}", url);
        let resp = self.http.post(url).json(body).send().await?;
        decode(resp).await
    }

    // ===== READ ENDPOINTS =====

    pub async fn health(&self) -> Result<Health> {
        self.get("/ui/v1/health").await
    }

    pub async fn cluster_page(&self) -> Result<ClusterSnapshot> {
        self.get("/ui/v1/cluster").await
    }

    pub async fn broker_page(&self, broker_id: &str) -> Result<BrokerDetail> {
        self.get(&format!("/ui/v1/brokers/{}", urlencoding::encode(broker_id)))
            .await
    }

    pub async fn topics(&self) -> Result<TopicsResponse> {
        self.get("/ui/v1/topics").await
    }

    /// The topic name travels as a single escaped segment: `/default/t` => `%2Fdefault%2Ft`.
    pub async fn topic_page(&self, topic: &str) -> Result<TopicDetail> {
        self.get(&format!("/ui/v1/topics/{}", urlencoding::encode(topic)))
            .await
    }

    pub async fn topic_series(&self, topic: &str, range: &SeriesRange) -> Result<TimeSeriesSet> {
        self.get(&format!(
            "/ui/v1/topics/{}/series?from={}&to={}&step={}",
            urlencoding::encode(topic),
            range.from,
            range.to,
            urlencoding::encode(&range.step)
        ))
        .await
    }

    pub async fn namespaces(&self) -> Result<NamespacesResponse> {
        self.get("/ui/v1/namespaces").await
    }

    // ===== ACTION ENDPOINTS =====

    pub async fn cluster_action<B: Serialize + ?Sized>(&self, body: &B) -> Result<ActionResponse> {
        self.post(CLUSTER_ACTIONS_PATH, body).await
    }

    pub async fn topic_action<B: Serialize + ?Sized>(&self, body: &B) -> Result<ActionResponse> {
        self.post(TOPIC_ACTIONS_PATH, body).await
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let message = server_message(&body).unwrap_or_else(|| {
            format!("request failed with status code {}", status.as_u16())
        });
        return Err(GatewayError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| GatewayError::Decode(e.to_string()))
}

/// Picks the server supplied message out of an error body.
///
/// Action endpoints answer `{success, message}`, the read endpoints
/// `{error, code}`; `message` wins when both are present.
pub(crate) fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"].iter().find_map(|key| {
        value
            .get(*key)
            .and_then(|m| m.as_str())
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string)
    })
}
