use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::packet::{PacketError, DEFAULT_NAMESPACE};

const SOCKET_IO_PATH: &str = "/socket.io/?EIO=4&transport=websocket";

#[derive(Debug, Clone)]
pub struct ChannelSettings {
    /// HTTP base URL of the backend, e.g. `http://localhost:5000`.
    pub endpoint: String,
    pub namespace: String,
    pub connect_timeout: Duration,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5000".to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl ChannelSettings {
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// The Engine.IO websocket URL for the configured endpoint.
    pub fn websocket_url(&self) -> Result<String, ChannelError> {
        let base = self.endpoint.trim_end_matches('/');
        let ws_base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            return Err(ChannelError::InvalidEndpoint(self.endpoint.clone()));
        };
        Ok(format!("{ws_base}{SOCKET_IO_PATH}"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    /// The namespace connect was acknowledged; buffered emits are flushed now.
    Connected { sid: Option<String> },
    /// A named event from the backend with its first argument (`null` when absent).
    Event { name: String, payload: Value },
    /// The session ended. No reconnect is attempted.
    Disconnected { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChannelCommand {
    Emit { name: String, payload: Value },
    Close,
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("endpoint must start with http:// or https://: {0}")]
    InvalidEndpoint(String),
    #[error("failed to connect websocket {url}: {message}")]
    Connect { url: String, message: String },
    #[error("connect timed out after {0:?}")]
    Timeout(Duration),
    #[error("websocket error: {0}")]
    Transport(String),
    #[error("protocol error: {0}")]
    Protocol(#[from] PacketError),
    #[error("namespace connect rejected: {0}")]
    Rejected(String),
    #[error("async runtime unavailable: {0}")]
    Runtime(String),
}
