pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8080";

/// Configuration for the admin gateway HTTP client
#[derive(Clone, Debug)]
pub struct GatewayClientConfig {
    pub base_url: String,
    /// Per-request timeout; `None` leaves the transport default in place.
    pub request_timeout_ms: Option<u64>,
}

impl Default for GatewayClientConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("DANUBE_GATEWAY_URL")
                .unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string()),
            request_timeout_ms: None,
        }
    }
}

impl GatewayClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout_ms: None,
        }
    }
}
