pub mod config;
pub mod errors;
pub mod http_client;

pub use config::GatewayClientConfig;
pub use errors::{GatewayError, Result};
pub use http_client::GatewayClient;
