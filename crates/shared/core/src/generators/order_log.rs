use chrono::Duration;
use rand::Rng;
use rand::rngs::StdRng;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{
    GeneratorId, GeneratorSession, MarketDataGenerator, effective_step, interval_from_ms,
    sample_volume, seeded_rng, walk_price,
};
use crate::entities::{
    DataType, MarketData, OrderLogAction, OrderLogItem, SecurityId, Side, TransactionIdGenerator,
};
use crate::values::{Price, Quantity, Timestamp};

/// Upper bound on resting orders tracked by one session
const MAX_LIVE_ORDERS: usize = 64;

/// Parameters of the order log generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderLogGeneratorParams {
    /// Simulated milliseconds between two entries
    pub interval_ms: u64,
    pub initial_price: Price,
    pub price_step: Price,
    pub max_price_steps: u32,
    pub volume_step: Quantity,
    pub min_volume_lots: u64,
    pub max_volume_lots: u64,
    pub seed: Option<u64>,
}

impl Default for OrderLogGeneratorParams {
    fn default() -> Self {
        Self {
            interval_ms: 500,
            initial_price: dec!(100),
            price_step: dec!(0.01),
            max_price_steps: 10,
            volume_step: dec!(1),
            min_volume_lots: 1,
            max_volume_lots: 10,
            seed: None,
        }
    }
}

/// Order log generator
///
/// Emits a stream of order registrations, cancellations and matches
/// against the orders it registered earlier.
#[derive(Debug, Clone)]
pub struct OrderLogGenerator {
    id: GeneratorId,
    security_id: SecurityId,
    params: OrderLogGeneratorParams,
}

impl OrderLogGenerator {
    pub fn new(security_id: impl Into<SecurityId>, params: OrderLogGeneratorParams) -> Self {
        Self {
            id: GeneratorId::new(),
            security_id: security_id.into(),
            params,
        }
    }

    pub fn params(&self) -> &OrderLogGeneratorParams {
        &self.params
    }
}

impl MarketDataGenerator for OrderLogGenerator {
    fn id(&self) -> GeneratorId {
        self.id
    }

    fn security_id(&self) -> &SecurityId {
        &self.security_id
    }

    fn data_type(&self) -> DataType {
        DataType::OrderLog
    }

    fn interval(&self) -> Duration {
        interval_from_ms(self.params.interval_ms)
    }

    fn open_session(&self) -> Box<dyn GeneratorSession> {
        Box::new(OrderLogSession {
            security_id: self.security_id.clone(),
            rng: seeded_rng(self.params.seed),
            last_price: self.params.initial_price,
            live: Vec::new(),
            params: self.params.clone(),
        })
    }
}

#[derive(Debug, Clone)]
struct LiveOrder {
    order_id: u64,
    side: Side,
    price: Price,
    volume: Quantity,
}

struct OrderLogSession {
    security_id: SecurityId,
    params: OrderLogGeneratorParams,
    rng: StdRng,
    last_price: Price,
    live: Vec<LiveOrder>,
}

impl OrderLogSession {
    fn register(&mut self, time: Timestamp, ids: &TransactionIdGenerator) -> OrderLogItem {
        let step = effective_step(self.params.price_step);
        let price = walk_price(&mut self.rng, self.last_price, step, self.params.max_price_steps);
        let volume = sample_volume(
            &mut self.rng,
            self.params.volume_step,
            self.params.min_volume_lots,
            self.params.max_volume_lots,
        );
        let side = Side::of_quote(price, self.last_price);

        let order = LiveOrder {
            order_id: ids.next_id(),
            side,
            price,
            volume,
        };
        self.live.push(order.clone());
        self.item(order, OrderLogAction::Register, None, time)
    }

    fn close(
        &mut self,
        action: OrderLogAction,
        time: Timestamp,
        ids: &TransactionIdGenerator,
    ) -> OrderLogItem {
        let index = self.rng.gen_range(0..self.live.len());
        let order = self.live.swap_remove(index);

        let trade_id = match action {
            OrderLogAction::Match => {
                self.last_price = order.price;
                Some(ids.next_id())
            }
            _ => None,
        };
        self.item(order, action, trade_id, time)
    }

    fn item(
        &self,
        order: LiveOrder,
        action: OrderLogAction,
        trade_id: Option<u64>,
        time: Timestamp,
    ) -> OrderLogItem {
        OrderLogItem {
            order_id: order.order_id,
            security_id: self.security_id.clone(),
            side: order.side,
            price: order.price,
            volume: order.volume,
            action,
            trade_id,
            time,
        }
    }
}

impl GeneratorSession for OrderLogSession {
    fn next(&mut self, time: Timestamp, ids: &TransactionIdGenerator) -> MarketData {
        let item = if self.live.is_empty() {
            self.register(time, ids)
        } else if self.live.len() >= MAX_LIVE_ORDERS {
            self.close(OrderLogAction::Cancel, time, ids)
        } else {
            match self.rng.gen_range(0..4) {
                0 | 1 => self.register(time, ids),
                2 => self.close(OrderLogAction::Cancel, time, ids),
                _ => self.close(OrderLogAction::Match, time, ids),
            }
        };
        MarketData::OrderLog(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashSet;

    #[test]
    fn test_first_entry_is_registration() {
        let generator = OrderLogGenerator::new(
            "SOL-USD",
            OrderLogGeneratorParams {
                seed: Some(5),
                ..Default::default()
            },
        );
        assert_eq!(generator.data_type(), DataType::OrderLog);

        let mut session = generator.open_session();
        let MarketData::OrderLog(item) = session.next(Utc::now(), &TransactionIdGenerator::default())
        else {
            panic!("order log generator must emit order log items");
        };
        assert_eq!(item.action, OrderLogAction::Register);
        assert!(item.trade_id.is_none());
    }

    #[test]
    fn test_cancels_and_matches_refer_to_registered_orders() {
        let generator = OrderLogGenerator::new(
            "SOL-USD",
            OrderLogGeneratorParams {
                seed: Some(21),
                ..Default::default()
            },
        );
        let ids = TransactionIdGenerator::default();
        let mut session = generator.open_session();

        let mut live = HashSet::new();
        let mut matches = 0;
        for _ in 0..500 {
            let MarketData::OrderLog(item) = session.next(Utc::now(), &ids) else {
                panic!("order log generator must emit order log items");
            };
            match item.action {
                OrderLogAction::Register => {
                    assert!(live.insert(item.order_id));
                }
                OrderLogAction::Cancel => {
                    assert!(live.remove(&item.order_id));
                    assert!(item.trade_id.is_none());
                }
                OrderLogAction::Match => {
                    assert!(live.remove(&item.order_id));
                    assert!(item.trade_id.is_some());
                    matches += 1;
                }
            }
            assert!(live.len() <= MAX_LIVE_ORDERS);
        }
        assert!(matches > 0);
    }
}
