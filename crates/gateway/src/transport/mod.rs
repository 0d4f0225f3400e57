//! Transport abstraction layer
//!
//! Two directions, two shapes:
//! - Inbound (connector → adapter): [`MessageSender`], a synchronous,
//!   non-blocking handoff. FIFO per sender; a message is either accepted
//!   or the call fails, never silently dropped. No ordering is promised
//!   between different sending threads.
//! - Outbound (adapter → consumers): [`Publisher`]/[`Subscriber`] over
//!   tokio broadcast channels.

pub mod channel;
pub mod config;
pub mod inbound;

pub use config::Subjects;

use crate::error::TransportError;
use crate::messages::Message;
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

/// Outbound send primitive of a connector
pub trait MessageSender: Send + Sync {
    /// Hand a message to the adapter side of the channel
    fn send(&self, msg: Message) -> Result<(), TransportError>;
}

/// Fan-out of adapter output
#[async_trait]
pub trait Publisher<M>: Send + Sync
where
    M: Serialize + Send + Sync,
{
    /// Deliver `msg` to every unfiltered subscriber
    async fn publish(&self, msg: &M) -> Result<(), TransportError>;

    /// Deliver `msg` tagged with `subject`; transports without subject
    /// routing fall back to [`publish`](Self::publish)
    async fn publish_to(&self, subject: &str, msg: &M) -> Result<(), TransportError> {
        let _ = subject;
        self.publish(msg).await
    }
}

/// Consumer end of a [`Publisher`]
#[async_trait]
pub trait Subscriber<M>: Send
where
    M: DeserializeOwned + Send,
{
    /// Wait for the next accepted message; fails once the publisher is gone
    async fn next(&mut self) -> Result<M, TransportError>;

    /// Next accepted message if one is already buffered
    fn try_next(&mut self) -> Result<Option<M>, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Object safety
    fn _assert_sender_object_safe(_: &dyn MessageSender) {}
    fn _assert_publisher_object_safe(_: &dyn Publisher<String>) {}
    fn _assert_subscriber_object_safe(_: &mut dyn Subscriber<String>) {}
}
