//! Emulation message adapter
//!
//! Consumes inbound [`Message`]s and drives a [`MarketEmulator`]:
//! - `Generator` messages add or remove synthetic data sources
//! - `Time` messages advance simulated time and make every registered
//!   generator emit the data that became due
//!
//! Duplicate subscriptions and unsubscriptions of unknown generators are
//! refused here, by the backend, and reported through a
//! [`SubscriptionResponse`] carrying the reason.

use hermes_core::{
    GeneratorId, GeneratorSession, MarketData, MarketDataGenerator, Timestamp,
    TransactionIdGenerator,
};
use hermes_gateway::{GeneratorMessage, Message, OutMessage, SubscriptionResponse};
use log::{debug, info, warn};
use std::sync::Arc;

use crate::emulator::{EmulatorSettings, MarketEmulator};
use crate::error::{ConnectorError, Result};

/// A registered generator and its emission state
struct Subscription {
    generator: Arc<dyn MarketDataGenerator>,
    session: Box<dyn GeneratorSession>,
    /// `None` once the schedule runs past the representable time range
    next_due: Option<Timestamp>,
}

/// Adapter executing messages in a [`MarketEmulator`]
pub struct EmulationMessageAdapter {
    emulator: Option<Arc<MarketEmulator>>,
    transaction_ids: Arc<TransactionIdGenerator>,
    /// Registration order is emission order for simultaneous data
    subscriptions: Vec<Subscription>,
}

impl EmulationMessageAdapter {
    /// Create an adapter with no emulator attached yet
    pub fn new(transaction_ids: Arc<TransactionIdGenerator>) -> Self {
        Self {
            emulator: None,
            transaction_ids,
            subscriptions: Vec::new(),
        }
    }

    /// Create an adapter driving `emulator`
    pub fn with_emulator(
        transaction_ids: Arc<TransactionIdGenerator>,
        emulator: Arc<MarketEmulator>,
    ) -> Self {
        Self {
            emulator: Some(emulator),
            ..Self::new(transaction_ids)
        }
    }

    /// Attach (or replace) the emulator
    pub fn set_emulator(&mut self, emulator: Arc<MarketEmulator>) {
        self.emulator = Some(emulator);
    }

    pub fn emulator(&self) -> Result<&Arc<MarketEmulator>> {
        self.emulator.as_ref().ok_or_else(|| {
            ConnectorError::NotInitialized("emulation adapter has no emulator".to_string())
        })
    }

    /// Current emulator settings, read on every call
    pub fn settings(&self) -> Result<EmulatorSettings> {
        Ok(self.emulator()?.settings())
    }

    /// Whether the emulator executes order re-registration atomically
    pub fn is_support_atomic_re_register(&self) -> Result<bool> {
        Ok(self.settings()?.is_support_atomic_re_register)
    }

    pub fn transaction_ids(&self) -> &Arc<TransactionIdGenerator> {
        &self.transaction_ids
    }

    pub fn is_registered(&self, id: GeneratorId) -> bool {
        self.subscriptions.iter().any(|s| s.generator.id() == id)
    }

    /// Registered generators, in registration order
    pub fn generators(&self) -> Vec<Arc<dyn MarketDataGenerator>> {
        self.subscriptions
            .iter()
            .map(|s| s.generator.clone())
            .collect()
    }

    /// Process one inbound message
    pub fn handle(&mut self, msg: Message) -> Result<Vec<OutMessage>> {
        debug!("Adapter handling {} message", msg.kind());

        match msg {
            Message::Time(time) => self.on_time(time),
            Message::Generator(msg) => Ok(vec![self.on_generator(msg)?]),
        }
    }

    fn on_generator(&mut self, msg: GeneratorMessage) -> Result<OutMessage> {
        let emulator = self.emulator()?.clone();
        let id = msg.generator_id();
        let position = self
            .subscriptions
            .iter()
            .position(|s| s.generator.id() == id);

        let error = match (msg.is_subscribe(), position) {
            (true, Some(_)) => {
                warn!(
                    "Generator {} for {} ({}) is already registered",
                    id,
                    msg.security_id(),
                    msg.data_type()
                );
                Some(format!("generator {} is already registered", id))
            }
            (true, None) => {
                let generator = msg.generator().clone();
                match emulator
                    .current_time()
                    .checked_add_signed(generator.interval())
                {
                    Some(next_due) => {
                        info!(
                            "Registered {} generator {} for {}, first emission at {}",
                            msg.data_type(),
                            id,
                            msg.security_id(),
                            next_due
                        );
                        self.subscriptions.push(Subscription {
                            session: generator.open_session(),
                            generator,
                            next_due: Some(next_due),
                        });
                        None
                    }
                    None => {
                        warn!(
                            "Generator {} for {} ({}) has an interval beyond the time range",
                            id,
                            msg.security_id(),
                            msg.data_type()
                        );
                        Some(format!(
                            "generator {} interval {} overflows simulated time",
                            id,
                            generator.interval()
                        ))
                    }
                }
            }
            (false, Some(index)) => {
                self.subscriptions.remove(index);
                info!(
                    "Unregistered {} generator {} for {}",
                    msg.data_type(),
                    id,
                    msg.security_id()
                );
                None
            }
            (false, None) => {
                warn!(
                    "Generator {} for {} ({}) is not registered",
                    id,
                    msg.security_id(),
                    msg.data_type()
                );
                Some(format!("generator {} is not registered", id))
            }
        };

        Ok(OutMessage::SubscriptionResponse(SubscriptionResponse {
            generator_id: id,
            security_id: msg.security_id().clone(),
            data_type: msg.data_type(),
            is_subscribe: msg.is_subscribe(),
            error,
        }))
    }

    fn on_time(&mut self, time: Timestamp) -> Result<Vec<OutMessage>> {
        let emulator = self.emulator()?.clone();

        if !emulator.advance_time(time) {
            debug!(
                "Ignoring time {} behind emulator time {}",
                time,
                emulator.current_time()
            );
            return Ok(Vec::new());
        }

        let cap = emulator.settings().max_emissions_per_step.max(1);
        let mut produced: Vec<MarketData> = Vec::new();

        for sub in &mut self.subscriptions {
            let interval = sub.generator.interval();
            let mut emitted = 0;

            while let Some(due) = sub.next_due.filter(|due| *due <= time) {
                if emitted == cap {
                    let skipped = (time - due).num_milliseconds()
                        / interval.num_milliseconds().max(1);
                    warn!(
                        "Generator {} hit {} emissions in one step, skipping ~{} intervals",
                        sub.generator.id(),
                        cap,
                        skipped
                    );
                    sub.next_due = time.checked_add_signed(interval);
                    break;
                }

                produced.push(sub.session.next(due, &self.transaction_ids));
                sub.next_due = due.checked_add_signed(interval);
                emitted += 1;
            }

            if sub.next_due.is_none() {
                debug!(
                    "Generator {} has no emission left within the time range",
                    sub.generator.id()
                );
            }
        }

        // Stable sort: simultaneous data keep registration order
        produced.sort_by_key(|data| data.time());

        debug!(
            "Advanced to {}, {} generators produced {} items",
            time,
            self.subscriptions.len(),
            produced.len()
        );

        Ok(produced
            .into_iter()
            .map(|data| OutMessage::MarketData(emulator.apply(data)))
            .collect())
    }
}
