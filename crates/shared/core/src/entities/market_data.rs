use serde::{Deserialize, Serialize};

use super::{DataType, SecurityId, Side};
use crate::values::{Price, Quantity, Timestamp};

/// Order book level (price + volume)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteLevel {
    pub price: Price,
    pub volume: Quantity,
}

impl QuoteLevel {
    /// Create a new quote level
    pub fn new(price: Price, volume: Quantity) -> Self {
        Self { price, volume }
    }
}

/// A single trade print
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeTick {
    pub trade_id: u64,
    pub security_id: SecurityId,
    pub price: Price,
    pub volume: Quantity,
    /// Aggressor side
    pub side: Side,
    pub time: Timestamp,
}

/// Full order book snapshot
///
/// Bids are sorted best (highest) first, asks best (lowest) first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthSnapshot {
    pub security_id: SecurityId,
    pub bids: Vec<QuoteLevel>,
    pub asks: Vec<QuoteLevel>,
    pub time: Timestamp,
}

impl DepthSnapshot {
    pub fn best_bid(&self) -> Option<&QuoteLevel> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&QuoteLevel> {
        self.asks.first()
    }

    /// Keep at most `depth` levels per side
    pub fn truncate(&mut self, depth: usize) {
        self.bids.truncate(depth);
        self.asks.truncate(depth);
    }
}

/// What happened to an order in the order log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderLogAction {
    Register,
    Cancel,
    Match,
}

/// Order log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLogItem {
    pub order_id: u64,
    pub security_id: SecurityId,
    pub side: Side,
    pub price: Price,
    pub volume: Quantity,
    pub action: OrderLogAction,
    /// Set only for `OrderLogAction::Match`
    pub trade_id: Option<u64>,
    pub time: Timestamp,
}

/// Any piece of market data a generator can produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarketData {
    Tick(TradeTick),
    Depth(DepthSnapshot),
    OrderLog(OrderLogItem),
}

impl MarketData {
    pub fn security_id(&self) -> &SecurityId {
        match self {
            MarketData::Tick(t) => &t.security_id,
            MarketData::Depth(d) => &d.security_id,
            MarketData::OrderLog(o) => &o.security_id,
        }
    }

    pub fn time(&self) -> Timestamp {
        match self {
            MarketData::Tick(t) => t.time,
            MarketData::Depth(d) => d.time,
            MarketData::OrderLog(o) => o.time,
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            MarketData::Tick(_) => DataType::Ticks,
            MarketData::Depth(_) => DataType::MarketDepth,
            MarketData::OrderLog(_) => DataType::OrderLog,
        }
    }
}
