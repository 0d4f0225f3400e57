//! Tokio broadcast transport for adapter output
//!
//! Every subscriber sees every message published after it subscribed.
//! Messages published with a subject can additionally be filtered by a
//! subject pattern (see [`Subjects::matches`]).

use crate::error::TransportError;
use crate::transport::{Publisher, Subjects, Subscriber};
use async_trait::async_trait;
use log::warn;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};

#[derive(Debug, Clone)]
struct Envelope<M> {
    subject: Option<Arc<str>>,
    msg: M,
}

/// Broadcast publisher for adapter output
pub struct ChannelPublisher<M> {
    tx: broadcast::Sender<Envelope<M>>,
}

impl<M: Clone> ChannelPublisher<M> {
    /// Create a publisher buffering up to `capacity` messages per subscriber
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Create a publisher together with its first subscriber
    pub fn pair(capacity: usize) -> (Self, ChannelSubscriber<M>) {
        let publisher = Self::with_capacity(capacity);
        let subscriber = publisher.subscribe();
        (publisher, subscriber)
    }

    /// Subscriber receiving everything
    pub fn subscribe(&self) -> ChannelSubscriber<M> {
        ChannelSubscriber {
            rx: self.tx.subscribe(),
            pattern: None,
        }
    }

    /// Subscriber receiving only messages published on a subject matching `pattern`
    pub fn subscribe_to(&self, pattern: impl Into<String>) -> ChannelSubscriber<M> {
        ChannelSubscriber {
            rx: self.tx.subscribe(),
            pattern: Some(pattern.into()),
        }
    }

    pub fn has_subscribers(&self) -> bool {
        self.tx.receiver_count() > 0
    }

    fn send(&self, subject: Option<&str>, msg: &M) -> Result<(), TransportError> {
        self.tx
            .send(Envelope {
                subject: subject.map(Arc::from),
                msg: msg.clone(),
            })
            .map(|_| ())
            .map_err(|_| TransportError::ChannelClosed)
    }
}

#[async_trait]
impl<M> Publisher<M> for ChannelPublisher<M>
where
    M: Serialize + Clone + Send + Sync + 'static,
{
    async fn publish(&self, msg: &M) -> Result<(), TransportError> {
        self.send(None, msg)
    }

    async fn publish_to(&self, subject: &str, msg: &M) -> Result<(), TransportError> {
        self.send(Some(subject), msg)
    }
}

/// Broadcast subscriber, optionally filtered by subject pattern
///
/// Messages published without a subject only reach unfiltered subscribers.
pub struct ChannelSubscriber<M> {
    rx: broadcast::Receiver<Envelope<M>>,
    pattern: Option<String>,
}

impl<M> ChannelSubscriber<M> {
    fn accepts(&self, envelope: &Envelope<M>) -> bool {
        match (&self.pattern, &envelope.subject) {
            (None, _) => true,
            (Some(pattern), Some(subject)) => Subjects::matches(pattern, subject),
            (Some(_), None) => false,
        }
    }
}

#[async_trait]
impl<M> Subscriber<M> for ChannelSubscriber<M>
where
    M: DeserializeOwned + Clone + Send + 'static,
{
    async fn next(&mut self) -> Result<M, TransportError> {
        loop {
            match self.rx.recv().await {
                Ok(envelope) if self.accepts(&envelope) => return Ok(envelope.msg),
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Subscriber lagged, skipped {} messages", skipped);
                }
                Err(RecvError::Closed) => return Err(TransportError::ChannelClosed),
            }
        }
    }

    fn try_next(&mut self) -> Result<Option<M>, TransportError> {
        loop {
            match self.rx.try_recv() {
                Ok(envelope) if self.accepts(&envelope) => return Ok(Some(envelope.msg)),
                Ok(_) => continue,
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!("Subscriber lagged, skipped {} messages", skipped);
                }
                Err(TryRecvError::Closed) => return Err(TransportError::ChannelClosed),
            }
        }
    }
}
