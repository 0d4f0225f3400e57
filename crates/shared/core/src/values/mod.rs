use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Instrument price in quote currency
pub type Price = Decimal;

/// Traded or quoted amount in instrument units
pub type Quantity = Decimal;

/// Instant on the emulator's clock (or wall clock for live connectors)
pub type Timestamp = DateTime<Utc>;
