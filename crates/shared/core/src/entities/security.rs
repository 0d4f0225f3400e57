use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a tradeable security (e.g. `BTC-USD@SIM`)
///
/// Stored on generators, generator messages and market data so that
/// routing never needs the full security definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SecurityId(pub String);

impl SecurityId {
    /// Create a new security ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identifier carries no code (never valid for routing)
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for SecurityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SecurityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SecurityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Kind of market data a generator produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Trade prints
    Ticks,
    /// Order book snapshots
    MarketDepth,
    /// Order log entries (register / cancel / match)
    OrderLog,
}

impl DataType {
    /// Short name used in subjects and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Ticks => "ticks",
            DataType::MarketDepth => "depth",
            DataType::OrderLog => "orderlog",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
