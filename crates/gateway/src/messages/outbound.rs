//! Messages published by an adapter to its consumers

use crate::transport::Subjects;
use hermes_core::{DataType, GeneratorId, MarketData, SecurityId};
use serde::{Deserialize, Serialize};

/// Outcome of a generator subscribe/unsubscribe request as seen by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    pub generator_id: GeneratorId,
    pub security_id: SecurityId,
    pub data_type: DataType,
    pub is_subscribe: bool,
    /// Set when the backend refused the request
    pub error: Option<String>,
}

impl SubscriptionResponse {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Message emitted by an adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutMessage {
    MarketData(MarketData),
    SubscriptionResponse(SubscriptionResponse),
}

impl OutMessage {
    /// Logical subject this message is published on
    pub fn subject(&self) -> String {
        match self {
            OutMessage::MarketData(data) => {
                Subjects::market_data(data.security_id().as_str(), data.data_type())
            }
            OutMessage::SubscriptionResponse(_) => Subjects::SUBSCRIPTIONS.to_string(),
        }
    }
}
