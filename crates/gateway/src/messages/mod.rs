//! Message types exchanged between a connector and its adapter
//!
//! `Message` travels connector → adapter over the inbound channel and
//! may carry non-serializable payloads (generator references).
//! `OutMessage` travels adapter → consumers and is plain data.

pub mod generator;
pub mod outbound;

pub use generator::GeneratorMessage;
pub use outbound::{OutMessage, SubscriptionResponse};

use hermes_core::Timestamp;

/// Inbound message handed to a message adapter
#[derive(Debug, Clone)]
pub enum Message {
    /// Simulated time has advanced to the given instant
    Time(Timestamp),
    /// Start or stop a synthetic data generator
    Generator(GeneratorMessage),
}

impl Message {
    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Message::Time(_) => "time",
            Message::Generator(_) => "generator",
        }
    }
}

impl From<GeneratorMessage> for Message {
    fn from(msg: GeneratorMessage) -> Self {
        Message::Generator(msg)
    }
}
