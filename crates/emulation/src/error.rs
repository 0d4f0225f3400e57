use hermes_gateway::{GatewayError, TransportError};
use hermes_ports::TimeSourceError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the emulation connector and its adapter
///
/// Nothing here is retried or downgraded to a log line: every error
/// stops the call that triggered it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectorError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Channel unavailable: {0}")]
    ChannelUnavailable(String),

    #[error("Not initialized: {0}")]
    NotInitialized(String),

    #[error("Time source error: {0}")]
    TimeSource(#[from] TimeSourceError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, ConnectorError>;

impl From<TransportError> for ConnectorError {
    fn from(err: TransportError) -> Self {
        ConnectorError::ChannelUnavailable(err.to_string())
    }
}

impl From<GatewayError> for ConnectorError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::InvalidArgument(msg) => ConnectorError::InvalidArgument(msg),
            GatewayError::Transport(e) => e.into(),
        }
    }
}
