use chrono::Duration;
use rand::rngs::StdRng;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{
    GeneratorId, GeneratorSession, MarketDataGenerator, effective_step, interval_from_ms,
    sample_volume, seeded_rng, walk_price,
};
use crate::entities::{
    DataType, MarketData, SecurityId, Side, TradeTick, TransactionIdGenerator,
};
use crate::values::{Price, Quantity, Timestamp};

/// Parameters of the random-walk trade generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeGeneratorParams {
    /// Simulated milliseconds between two trades
    pub interval_ms: u64,
    /// Price of the first trade before any move
    pub initial_price: Price,
    pub price_step: Price,
    /// Maximum move per trade, in price steps
    pub max_price_steps: u32,
    pub volume_step: Quantity,
    pub min_volume_lots: u64,
    pub max_volume_lots: u64,
    /// Fixed seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for TradeGeneratorParams {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            initial_price: dec!(100),
            price_step: dec!(0.01),
            max_price_steps: 10,
            volume_step: dec!(1),
            min_volume_lots: 1,
            max_volume_lots: 20,
            seed: None,
        }
    }
}

/// Trade prints generator
#[derive(Debug, Clone)]
pub struct TradeGenerator {
    id: GeneratorId,
    security_id: SecurityId,
    params: TradeGeneratorParams,
}

impl TradeGenerator {
    pub fn new(security_id: impl Into<SecurityId>, params: TradeGeneratorParams) -> Self {
        Self {
            id: GeneratorId::new(),
            security_id: security_id.into(),
            params,
        }
    }

    pub fn params(&self) -> &TradeGeneratorParams {
        &self.params
    }
}

impl MarketDataGenerator for TradeGenerator {
    fn id(&self) -> GeneratorId {
        self.id
    }

    fn security_id(&self) -> &SecurityId {
        &self.security_id
    }

    fn data_type(&self) -> DataType {
        DataType::Ticks
    }

    fn interval(&self) -> Duration {
        interval_from_ms(self.params.interval_ms)
    }

    fn open_session(&self) -> Box<dyn GeneratorSession> {
        Box::new(TradeSession {
            security_id: self.security_id.clone(),
            rng: seeded_rng(self.params.seed),
            last_price: self.params.initial_price,
            params: self.params.clone(),
        })
    }
}

struct TradeSession {
    security_id: SecurityId,
    params: TradeGeneratorParams,
    rng: StdRng,
    last_price: Price,
}

impl GeneratorSession for TradeSession {
    fn next(&mut self, time: Timestamp, ids: &TransactionIdGenerator) -> MarketData {
        let step = effective_step(self.params.price_step);
        let price = walk_price(&mut self.rng, self.last_price, step, self.params.max_price_steps);
        self.last_price = price;

        let volume = sample_volume(
            &mut self.rng,
            self.params.volume_step,
            self.params.min_volume_lots,
            self.params.max_volume_lots,
        );
        let side = Side::random(&mut self.rng);

        MarketData::Tick(TradeTick {
            trade_id: ids.next_id(),
            security_id: self.security_id.clone(),
            price,
            volume,
            side,
            time,
        })
    }
}
