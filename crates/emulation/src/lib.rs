//! Hermes Emulation Connector
//!
//! A connector whose backend is a simulated market:
//! - generator registrations are routed, in call order, to the adapter
//! - the market timer is replaced by simulated time driven by the caller
//! - the backend's atomic re-registration capability is read through live
//!
//! ## Usage
//!
//! ```ignore
//! use hermes_core::{TradeGenerator, TradeGeneratorParams};
//! use hermes_emulation::{EmulationConfig, EmulationConnector};
//! use std::sync::Arc;
//!
//! let mut connector = EmulationConnector::new(EmulationConfig::default())?;
//! let mut data = connector.market_data();
//!
//! connector.register_trades(Arc::new(TradeGenerator::new("BTC-USD", TradeGeneratorParams::default())))?;
//! connector.advance_time(start + chrono::Duration::seconds(5))?;
//! connector.pump().await?;
//! ```

pub mod adapter;
pub mod config;
pub mod connector;
pub mod emulator;
pub mod error;

pub use adapter::EmulationMessageAdapter;
pub use config::{ConfigError, EmulationConfig};
pub use connector::EmulationConnector;
pub use emulator::{EmulatorSettings, MarketEmulator, SecurityState};
pub use error::{ConnectorError, Result};
