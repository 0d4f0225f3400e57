//! Hermes Gateway
//!
//! Message layer between a connector and its message adapter. Provides:
//! - Message types (inbound `Message`, outbound `OutMessage`, `GeneratorMessage`)
//! - Inbound transport: a synchronous, FIFO, non-dropping `MessageSender`
//! - Outbound transport: broadcast `Publisher`/`Subscriber` for market data consumers
//!
//! ## Architecture
//!
//! ```text
//!   Connector
//!       │ Message (Time, Generator)
//!       │ MessageSender ── mpsc ──► MessageReceiver
//!       ▼
//!   Message Adapter ──► Engine
//!       │ OutMessage (MarketData, SubscriptionResponse)
//!       │ Publisher ── broadcast ──► Subscriber(s)
//!       ▼
//!   Strategies / tests
//! ```
//!
//! Messages are in-process values; nothing here serializes the inbound side.

pub mod error;
pub mod messages;
pub mod transport;

// Re-export commonly used types
pub use error::{GatewayError, TransportError};
pub use messages::{GeneratorMessage, Message, OutMessage, SubscriptionResponse};
pub use transport::{
    MessageSender, Publisher, Subjects, Subscriber,
    channel::{ChannelPublisher, ChannelSubscriber},
    inbound::{ChannelSender, MessageReceiver, inbound_channel},
};
