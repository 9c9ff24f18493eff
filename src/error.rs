//! Error types for the scroll client

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors surfaced by the endpoint resolver, the response model and the client
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Cannot evaluate empty response")]
    EmptyResponse,

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Scroll ID required")]
    CursorRequired,

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    /// Whether the failure happened on the wire (connection, timeout or HTTP status)
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }
}

/// Why a hit's raw source could not be turned into a record
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Hit has no source")]
    Empty,

    #[error("Malformed source: {0}")]
    Malformed(#[from] serde_json::Error),
}
