//! Error types for gateway calls

use thiserror::Error;

/// Failures talking to the dashboard server
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request to {endpoint} failed")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} responded with status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("unexpected response body from {endpoint}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid upload part for {file_name}")]
    InvalidPart {
        file_name: String,
        #[source]
        source: reqwest::Error,
    },
}

impl GatewayError {
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            GatewayError::Transport { endpoint, .. }
            | GatewayError::Status { endpoint, .. }
            | GatewayError::Decode { endpoint, .. } => Some(endpoint),
            GatewayError::InvalidPart { .. } => None,
        }
    }
}
