//! Hermes Core Domain
//!
//! Pure domain types for the Hermes emulation connector.
//! This crate contains no async, no I/O, and is 100% unit testable.
//!
//! - `entities`: securities, data kinds and the market data the emulator consumes
//! - `generators`: synthetic market data sources (trades, order books, order log)

pub mod entities;
pub mod generators;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    DataType, DepthSnapshot, MarketData, OrderLogAction, OrderLogItem, QuoteLevel, SecurityId,
    Side, TradeTick, TransactionIdGenerator,
};
pub use generators::{
    GeneratorId, GeneratorSession, MarketDataGenerator, MarketDepthGenerator,
    MarketDepthGeneratorParams, OrderLogGenerator, OrderLogGeneratorParams, TradeGenerator,
    TradeGeneratorParams,
};
pub use values::{Price, Quantity, Timestamp};
