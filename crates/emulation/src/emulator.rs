//! Simulated execution engine
//!
//! The emulator owns its settings and the simulated clock, and keeps a
//! light per-security market state (last trade, top of book) from the
//! data it is fed. Order matching is out of its scope.

use hermes_clock::{Clock, SimulatedClock};
use hermes_core::{MarketData, OrderLogAction, Price, SecurityId, Timestamp};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Emulator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmulatorSettings {
    /// Order re-registration is executed as a single transaction
    pub is_support_atomic_re_register: bool,

    /// Order book snapshots are truncated to this many levels per side
    pub max_depth: usize,

    /// Cap on items a single generator may emit for one time advance;
    /// beyond it the generator's schedule skips ahead
    pub max_emissions_per_step: usize,
}

impl Default for EmulatorSettings {
    fn default() -> Self {
        Self {
            is_support_atomic_re_register: true,
            max_depth: 20,
            max_emissions_per_step: 10_000,
        }
    }
}

/// Market state of one security as seen by the emulator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityState {
    pub last_price: Option<Price>,
    pub best_bid: Option<Price>,
    pub best_ask: Option<Price>,
    pub last_update: Option<Timestamp>,
}

/// Simulated execution engine
pub struct MarketEmulator {
    settings: RwLock<EmulatorSettings>,
    clock: SimulatedClock,
    securities: RwLock<HashMap<SecurityId, SecurityState>>,
}

impl MarketEmulator {
    pub fn new(settings: EmulatorSettings, start_time: Timestamp) -> Self {
        Self {
            settings: RwLock::new(settings),
            clock: SimulatedClock::new(start_time),
            securities: RwLock::new(HashMap::new()),
        }
    }

    /// Snapshot of the current settings
    pub fn settings(&self) -> EmulatorSettings {
        self.settings.read().clone()
    }

    /// Mutate settings in place; readers observe the change on their next read
    pub fn update_settings(&self, update: impl FnOnce(&mut EmulatorSettings)) {
        update(&mut *self.settings.write());
    }

    pub fn current_time(&self) -> Timestamp {
        self.clock.now()
    }

    /// Advance simulated time; returns false if `time` is in the past
    pub fn advance_time(&self, time: Timestamp) -> bool {
        self.clock.advance_to(time)
    }

    /// Feed one piece of market data, returning it as the emulator sees it
    pub fn apply(&self, mut data: MarketData) -> MarketData {
        let max_depth = self.settings.read().max_depth;

        let mut securities = self.securities.write();
        let state = securities.entry(data.security_id().clone()).or_default();

        match &mut data {
            MarketData::Tick(tick) => {
                state.last_price = Some(tick.price);
                state.last_update = Some(tick.time);
            }
            MarketData::Depth(depth) => {
                depth.truncate(max_depth);
                state.best_bid = depth.best_bid().map(|l| l.price);
                state.best_ask = depth.best_ask().map(|l| l.price);
                state.last_update = Some(depth.time);
            }
            MarketData::OrderLog(item) => {
                if item.action == OrderLogAction::Match {
                    state.last_price = Some(item.price);
                }
                state.last_update = Some(item.time);
            }
        }

        data
    }

    pub fn security_state(&self, security_id: &SecurityId) -> Option<SecurityState> {
        self.securities.read().get(security_id).cloned()
    }

    pub fn last_price(&self, security_id: &SecurityId) -> Option<Price> {
        self.security_state(security_id).and_then(|s| s.last_price)
    }

    pub fn best_bid(&self, security_id: &SecurityId) -> Option<Price> {
        self.security_state(security_id).and_then(|s| s.best_bid)
    }

    pub fn best_ask(&self, security_id: &SecurityId) -> Option<Price> {
        self.security_state(security_id).and_then(|s| s.best_ask)
    }
}
