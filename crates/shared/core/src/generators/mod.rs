//! Synthetic market data generators
//!
//! A generator is an immutable description of a synthetic data source:
//! which security it targets, which kind of data it emits and how. The
//! routing layer only reads the common attributes (`id`, `security_id`,
//! `data_type`); the emulation adapter opens a [`GeneratorSession`] to
//! actually produce data as simulated time advances.

mod depth;
mod order_log;
mod trade;

pub use depth::{MarketDepthGenerator, MarketDepthGeneratorParams};
pub use order_log::{OrderLogGenerator, OrderLogGeneratorParams};
pub use trade::{TradeGenerator, TradeGeneratorParams};

use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::entities::{DataType, MarketData, SecurityId, TransactionIdGenerator};
use crate::values::{Price, Quantity, Timestamp};

/// Unique identity of a generator instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneratorId(pub Uuid);

impl GeneratorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GeneratorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GeneratorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Common surface of every generator kind
pub trait MarketDataGenerator: Send + Sync + fmt::Debug {
    /// Identity used by the backend to match subscribe/unsubscribe pairs
    fn id(&self) -> GeneratorId;

    /// Target security
    fn security_id(&self) -> &SecurityId;

    /// Kind of data produced, fixed by the generator variant
    fn data_type(&self) -> DataType;

    /// Simulated time between two emissions (always positive)
    fn interval(&self) -> Duration;

    /// Start a fresh emission sequence
    fn open_session(&self) -> Box<dyn GeneratorSession>;
}

/// Mutable emission state of one registered generator
pub trait GeneratorSession: Send {
    /// Produce the next piece of data stamped with `time`
    fn next(&mut self, time: Timestamp, ids: &TransactionIdGenerator) -> MarketData;
}

/// Positive interval of `interval_ms`, clamped to `[1ms, Duration::max_value()]`
pub(crate) fn interval_from_ms(interval_ms: u64) -> Duration {
    let ms = i64::try_from(interval_ms.max(1)).unwrap_or(i64::MAX);
    Duration::try_milliseconds(ms).unwrap_or_else(Duration::max_value)
}

pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Non-positive steps fall back to one unit
pub(crate) fn effective_step(step: Decimal) -> Decimal {
    if step > Decimal::ZERO {
        step
    } else {
        Decimal::ONE
    }
}

/// Random walk of up to `max_steps` price steps, floored at one step
pub(crate) fn walk_price(rng: &mut StdRng, last: Price, step: Price, max_steps: u32) -> Price {
    let steps = if max_steps == 0 {
        0
    } else {
        let max = i64::from(max_steps);
        rng.gen_range(-max..=max)
    };

    let next = last + step * Decimal::from(steps);
    if next < step { step } else { next }
}

/// Volume in whole lots of `lot`, uniform in `[min_lots, max_lots]`
pub(crate) fn sample_volume(rng: &mut StdRng, lot: Quantity, min_lots: u64, max_lots: u64) -> Quantity {
    let lo = min_lots.max(1);
    let hi = max_lots.max(lo);
    effective_step(lot) * Decimal::from(rng.gen_range(lo..=hi))
}
