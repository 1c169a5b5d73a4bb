use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Uniform failure shape for everything that talks to the gateway.
///
/// Cloneable so one failed fetch can be handed to every observer sharing it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GatewayError {
    #[error("{0}")]
    Transport(String),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("unable to decode gateway response: {0}")]
    Decode(String),

    #[error("invalid gateway url: {0}")]
    InvalidUrl(String),

    #[error("request cancelled")]
    Cancelled,
}

impl GatewayError {
    /// Human readable message, as shown in banners and notifications.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, GatewayError::Cancelled)
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for GatewayError {
    fn from(err: url::ParseError) -> Self {
        GatewayError::InvalidUrl(err.to_string())
    }
}
