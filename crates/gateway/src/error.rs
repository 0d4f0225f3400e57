//! Error types for the gateway crate

use thiserror::Error;

/// Failures of the inbound or outbound channels
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Channel closed")]
    ChannelClosed,

    #[error("Channel full (capacity {0})")]
    ChannelFull(usize),
}

/// Errors building or delivering a message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
