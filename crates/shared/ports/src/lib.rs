//! Hermes Ports
//!
//! Port definitions (traits) for the Hermes emulation connector.
//! These define the boundaries between connector logic and infrastructure.

mod clock;
mod error;
mod time_source;

pub use clock::Clock;
pub use error::{TimeSourceError, TimeSourceResult};
pub use time_source::TimeSource;
