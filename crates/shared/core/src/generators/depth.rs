use chrono::Duration;
use rand::Rng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{
    GeneratorId, GeneratorSession, MarketDataGenerator, effective_step, interval_from_ms,
    sample_volume, seeded_rng, walk_price,
};
use crate::entities::{
    DataType, DepthSnapshot, MarketData, QuoteLevel, SecurityId, TransactionIdGenerator,
};
use crate::values::{Price, Quantity, Timestamp};

/// Parameters of the order book generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketDepthGeneratorParams {
    /// Simulated milliseconds between two snapshots
    pub interval_ms: u64,
    pub initial_mid_price: Price,
    pub price_step: Price,
    /// Maximum mid move per snapshot, in price steps
    pub max_price_steps: u32,
    pub max_bids_depth: usize,
    pub max_asks_depth: usize,
    pub min_spread_steps: u32,
    pub max_spread_steps: u32,
    pub volume_step: Quantity,
    pub max_volume_lots: u64,
    pub seed: Option<u64>,
}

impl Default for MarketDepthGeneratorParams {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            initial_mid_price: dec!(100),
            price_step: dec!(0.01),
            max_price_steps: 5,
            max_bids_depth: 10,
            max_asks_depth: 10,
            min_spread_steps: 1,
            max_spread_steps: 5,
            volume_step: dec!(1),
            max_volume_lots: 100,
            seed: None,
        }
    }
}

/// Order book snapshot generator
#[derive(Debug, Clone)]
pub struct MarketDepthGenerator {
    id: GeneratorId,
    security_id: SecurityId,
    params: MarketDepthGeneratorParams,
}

impl MarketDepthGenerator {
    pub fn new(security_id: impl Into<SecurityId>, params: MarketDepthGeneratorParams) -> Self {
        Self {
            id: GeneratorId::new(),
            security_id: security_id.into(),
            params,
        }
    }

    pub fn params(&self) -> &MarketDepthGeneratorParams {
        &self.params
    }
}

impl MarketDataGenerator for MarketDepthGenerator {
    fn id(&self) -> GeneratorId {
        self.id
    }

    fn security_id(&self) -> &SecurityId {
        &self.security_id
    }

    fn data_type(&self) -> DataType {
        DataType::MarketDepth
    }

    fn interval(&self) -> Duration {
        interval_from_ms(self.params.interval_ms)
    }

    fn open_session(&self) -> Box<dyn GeneratorSession> {
        Box::new(DepthSession {
            security_id: self.security_id.clone(),
            rng: seeded_rng(self.params.seed),
            mid: self.params.initial_mid_price,
            params: self.params.clone(),
        })
    }
}

struct DepthSession {
    security_id: SecurityId,
    params: MarketDepthGeneratorParams,
    rng: StdRng,
    mid: Price,
}

impl DepthSession {
    fn depth(&mut self, max: usize) -> usize {
        if max == 0 { 0 } else { self.rng.gen_range(1..=max) }
    }

    fn level(&mut self, price: Price) -> QuoteLevel {
        let volume = sample_volume(
            &mut self.rng,
            self.params.volume_step,
            1,
            self.params.max_volume_lots,
        );
        QuoteLevel::new(price, volume)
    }
}

impl GeneratorSession for DepthSession {
    fn next(&mut self, time: Timestamp, _ids: &TransactionIdGenerator) -> MarketData {
        let step = effective_step(self.params.price_step);
        self.mid = walk_price(&mut self.rng, self.mid, step, self.params.max_price_steps);

        let min_spread = self.params.min_spread_steps.max(1);
        let max_spread = self.params.max_spread_steps.max(min_spread);
        let spread_steps = self.rng.gen_range(min_spread..=max_spread);

        // Best bid sits on the step grid below mid, best ask `spread_steps` above it
        let best_bid = (self.mid / step).floor() * step;
        let best_ask = best_bid + step * Decimal::from(spread_steps);

        let bid_count = self.depth(self.params.max_bids_depth);
        let ask_count = self.depth(self.params.max_asks_depth);

        let mut bids = Vec::with_capacity(bid_count);
        for i in 0..bid_count {
            let price = best_bid - step * Decimal::from(i);
            if price <= Decimal::ZERO {
                break;
            }
            bids.push(self.level(price));
        }

        let asks = (0..ask_count)
            .map(|i| self.level(best_ask + step * Decimal::from(i)))
            .collect();

        MarketData::Depth(DepthSnapshot {
            security_id: self.security_id.clone(),
            bids,
            asks,
            time,
        })
    }
}
