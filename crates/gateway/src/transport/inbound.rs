//! Inbound channel (connector → adapter)
//!
//! Built on tokio mpsc: FIFO per sender, `send` never blocks and never
//! drops. Unbounded by default; a bounded channel reports `ChannelFull`
//! instead of waiting for room.

use crate::error::TransportError;
use crate::messages::Message;
use crate::transport::MessageSender;
use tokio::sync::mpsc::{self, error::TryRecvError, error::TrySendError};

/// Sending half of the inbound channel
#[derive(Clone)]
pub enum ChannelSender {
    Unbounded(mpsc::UnboundedSender<Message>),
    Bounded {
        tx: mpsc::Sender<Message>,
        capacity: usize,
    },
}

impl MessageSender for ChannelSender {
    fn send(&self, msg: Message) -> Result<(), TransportError> {
        match self {
            ChannelSender::Unbounded(tx) => tx.send(msg).map_err(|_| TransportError::ChannelClosed),
            ChannelSender::Bounded { tx, capacity } => tx.try_send(msg).map_err(|e| match e {
                TrySendError::Full(_) => TransportError::ChannelFull(*capacity),
                TrySendError::Closed(_) => TransportError::ChannelClosed,
            }),
        }
    }
}

/// Receiving half of the inbound channel, consumed by the adapter
pub enum MessageReceiver {
    Unbounded(mpsc::UnboundedReceiver<Message>),
    Bounded(mpsc::Receiver<Message>),
}

impl MessageReceiver {
    /// Wait for the next message; `None` once every sender is gone
    pub async fn next(&mut self) -> Option<Message> {
        match self {
            MessageReceiver::Unbounded(rx) => rx.recv().await,
            MessageReceiver::Bounded(rx) => rx.recv().await,
        }
    }

    /// Take the next message if one is queued
    pub fn try_next(&mut self) -> Result<Option<Message>, TransportError> {
        let result = match self {
            MessageReceiver::Unbounded(rx) => rx.try_recv(),
            MessageReceiver::Bounded(rx) => rx.try_recv(),
        };

        match result {
            Ok(msg) => Ok(Some(msg)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(TransportError::ChannelClosed),
        }
    }

    /// Stop accepting new messages; queued ones can still be drained
    pub fn close(&mut self) {
        match self {
            MessageReceiver::Unbounded(rx) => rx.close(),
            MessageReceiver::Bounded(rx) => rx.close(),
        }
    }
}

/// Create an inbound channel; `None` means unbounded
pub fn inbound_channel(capacity: Option<usize>) -> (ChannelSender, MessageReceiver) {
    match capacity {
        Some(capacity) => {
            let (tx, rx) = mpsc::channel(capacity.max(1));
            (
                ChannelSender::Bounded {
                    tx,
                    capacity: capacity.max(1),
                },
                MessageReceiver::Bounded(rx),
            )
        }
        None => {
            let (tx, rx) = mpsc::unbounded_channel();
            (ChannelSender::Unbounded(tx), MessageReceiver::Unbounded(rx))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn time_msg(offset_ms: i64) -> Message {
        Message::Time(Utc::now() + Duration::milliseconds(offset_ms))
    }

    fn time_of(msg: Option<Message>) -> i64 {
        match msg {
            Some(Message::Time(t)) => t.timestamp_millis(),
            other => panic!("expected time message, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fifo_order() {
        let (tx, mut rx) = inbound_channel(None);
        let sent: Vec<_> = (0..5).map(time_msg).collect();
        let expected: Vec<_> = sent
            .iter()
            .map(|m| time_of(Some(m.clone())))
            .collect();

        for msg in sent {
            tx.send(msg).unwrap();
        }

        for want in expected {
            assert_eq!(time_of(rx.next().await), want);
        }
        assert!(rx.try_next().unwrap().is_none());
    }

    #[test]
    fn test_bounded_full_is_reported() {
        let (tx, mut rx) = inbound_channel(Some(2));
        tx.send(time_msg(0)).unwrap();
        tx.send(time_msg(1)).unwrap();

        assert_eq!(tx.send(time_msg(2)), Err(TransportError::ChannelFull(2)));

        // Draining makes room again
        assert!(rx.try_next().unwrap().is_some());
        assert!(tx.send(time_msg(3)).is_ok());
    }

    #[test]
    fn test_closed_receiver_rejects_sends() {
        let (tx, mut rx) = inbound_channel(None);
        rx.close();
        assert_eq!(tx.send(time_msg(0)), Err(TransportError::ChannelClosed));

        let (tx, rx) = inbound_channel(Some(4));
        drop(rx);
        assert_eq!(tx.send(time_msg(0)), Err(TransportError::ChannelClosed));
    }

    #[test]
    fn test_per_sender_order_across_threads() {
        let (tx, mut rx) = inbound_channel(None);

        let handles: Vec<_> = (0..4i64)
            .map(|thread| {
                let tx = tx.clone();
                std::thread::spawn(move || {
                    for i in 0..25 {
                        tx.send(time_msg(thread * 1_000_000 + i)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut received = Vec::new();
        while let Some(msg) = rx.try_next().unwrap() {
            received.push(time_of(Some(msg)));
        }
        assert_eq!(received.len(), 100);

        // Interleaving across threads is free, order within a thread is not
        for thread in 0..4i64 {
            let base = received.iter().copied().min().unwrap_or_default() + thread * 1_000_000;
            let own: Vec<_> = received
                .iter()
                .copied()
                .filter(|t| (base - 500_000..base + 500_000).contains(t))
                .collect();
            assert_eq!(own.len(), 25);
            assert!(own.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_dropped_senders_disconnect() {
        let (tx, mut rx) = inbound_channel(None);
        tx.send(time_msg(0)).unwrap();
        drop(tx);

        assert!(rx.try_next().unwrap().is_some());
        assert_eq!(rx.try_next().unwrap_err(), TransportError::ChannelClosed);
    }
}
