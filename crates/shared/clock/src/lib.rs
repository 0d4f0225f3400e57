//! Hermes Clock Infrastructure
//!
//! Provides time abstractions for live and emulated connectors:
//!
//! ## Clocks
//!
//! ```text
//! SystemClock      wall-clock time (live trading)
//! SimulatedClock   advanced only by simulated data (emulation)
//! ```
//!
//! ## Market-time drivers
//!
//! ```text
//! MarketTimer      tokio interval reporting Clock::now() on every tick (live)
//! NoopTimeSource   never arms anything (emulation: time comes from data)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use hermes_clock::{MarketTimer, NoopTimeSource, SystemClock, TimeSource};
//! use std::{sync::Arc, time::Duration};
//!
//! let mut live = MarketTimer::new(Duration::from_millis(10), Arc::new(SystemClock::new()), |now| {
//!     log::debug!("market time {}", now);
//! });
//! live.start()?;
//!
//! let mut emulated = NoopTimeSource;
//! emulated.start()?; // nothing is scheduled
//! ```

mod noop;
mod simulated;
mod system;
mod timer;

pub use noop::NoopTimeSource;
pub use simulated::SimulatedClock;
pub use system::SystemClock;
pub use timer::{MarketTimer, TickHandler};

// Re-export the ports for convenience
pub use hermes_ports::{Clock, TimeSource, TimeSourceError};
