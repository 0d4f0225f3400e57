use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::values::Price;

/// Aggressor side of a trade, or side of an order in the order log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Side a passive order at `price` rests on, relative to `reference`:
    /// at or below it joins the bids, above it the asks
    pub fn of_quote(price: Price, reference: Price) -> Self {
        if price <= reference { Side::Buy } else { Side::Sell }
    }

    /// Either side with equal probability
    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}
