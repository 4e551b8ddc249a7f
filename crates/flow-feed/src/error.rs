//! Errors from the network layer.

use flow_protocol::ProtocolError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("query endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}
