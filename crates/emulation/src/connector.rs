//! Emulation connector
//!
//! Uniform connector surface backed by an [`EmulationMessageAdapter`].
//! Every registration call becomes one [`GeneratorMessage`] handed to the
//! outbound [`MessageSender`]; simulated time is moved by the caller through
//! [`EmulationConnector::advance_time`] and never by a wall-clock timer.

use hermes_clock::{NoopTimeSource, TimeSource};
use hermes_core::{
    MarketDataGenerator, MarketDepthGenerator, OrderLogGenerator, Timestamp, TradeGenerator,
    TransactionIdGenerator,
};
use hermes_gateway::{
    ChannelPublisher, ChannelSubscriber, GeneratorMessage, Message, MessageReceiver,
    MessageSender, OutMessage, Publisher, Subjects, inbound_channel,
};
use log::{debug, info};
use std::sync::Arc;

use crate::adapter::EmulationMessageAdapter;
use crate::config::EmulationConfig;
use crate::emulator::MarketEmulator;
use crate::error::{ConnectorError, Result};

/// Connector driving a simulated execution backend
pub struct EmulationConnector {
    name: String,
    adapter: EmulationMessageAdapter,
    sender: Arc<dyn MessageSender>,
    /// Inbound end of `sender`, drained by `pump`
    inbound: Option<MessageReceiver>,
    time_source: Box<dyn TimeSource>,
    output: ChannelPublisher<OutMessage>,
}

impl EmulationConnector {
    /// Build a connector, its emulator and its channels from configuration
    pub fn new(config: EmulationConfig) -> Result<Self> {
        config.validate()?;

        let transaction_ids = Arc::new(TransactionIdGenerator::new(config.transaction_id_start));
        let emulator = Arc::new(MarketEmulator::new(
            config.settings.clone(),
            config.start_time,
        ));
        let adapter = EmulationMessageAdapter::with_emulator(transaction_ids, emulator);
        let (sender, inbound) = inbound_channel(config.channel_capacity);

        info!(
            "Created emulation connector '{}' starting at {} ({} inbound channel)",
            config.name,
            config.start_time,
            match config.channel_capacity {
                Some(capacity) => format!("bounded({})", capacity),
                None => "unbounded".to_string(),
            }
        );

        Ok(Self::with_parts(
            config.name,
            adapter,
            Arc::new(sender),
            Some(inbound),
            Box::new(NoopTimeSource),
            config.output_capacity,
        ))
    }

    /// Assemble a connector from explicit parts
    ///
    /// Without an `inbound` receiver, messages go to `sender` only and
    /// [`pump`](Self::pump) is unavailable.
    pub fn with_parts(
        name: impl Into<String>,
        adapter: EmulationMessageAdapter,
        sender: Arc<dyn MessageSender>,
        inbound: Option<MessageReceiver>,
        time_source: Box<dyn TimeSource>,
        output_capacity: usize,
    ) -> Self {
        Self {
            name: name.into(),
            adapter,
            sender,
            inbound,
            time_source,
            output: ChannelPublisher::with_capacity(output_capacity.max(1)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn adapter(&self) -> &EmulationMessageAdapter {
        &self.adapter
    }

    pub fn emulator(&self) -> Result<&Arc<MarketEmulator>> {
        self.adapter.emulator()
    }

    // ========================================================================
    // Generator routing
    // ========================================================================

    /// Start a trades generator
    pub fn register_trades(&self, generator: Arc<TradeGenerator>) -> Result<()> {
        self.send_generator(generator, true)
    }

    /// Stop a trades generator
    pub fn unregister_trades(&self, generator: Arc<TradeGenerator>) -> Result<()> {
        self.send_generator(generator, false)
    }

    /// Start an order book generator
    pub fn register_market_depth(&self, generator: Arc<MarketDepthGenerator>) -> Result<()> {
        self.send_generator(generator, true)
    }

    /// Stop an order book generator
    pub fn unregister_market_depth(&self, generator: Arc<MarketDepthGenerator>) -> Result<()> {
        self.send_generator(generator, false)
    }

    /// Start an order log generator
    pub fn register_order_log(&self, generator: Arc<OrderLogGenerator>) -> Result<()> {
        self.send_generator(generator, true)
    }

    /// Stop an order log generator
    pub fn unregister_order_log(&self, generator: Arc<OrderLogGenerator>) -> Result<()> {
        self.send_generator(generator, false)
    }

    fn send_generator(
        &self,
        generator: Arc<dyn MarketDataGenerator>,
        is_subscribe: bool,
    ) -> Result<()> {
        let msg = GeneratorMessage::new(generator, is_subscribe)?;

        debug!(
            "[{}] {} -> {} {} generator {}",
            self.name,
            Subjects::generators(msg.security_id().as_str()),
            if is_subscribe { "register" } else { "unregister" },
            msg.data_type(),
            msg.generator_id()
        );

        self.send_in_message(msg.into())
    }

    /// Hand a message to the adapter side of the channel
    pub fn send_in_message(&self, msg: Message) -> Result<()> {
        self.sender.send(msg)?;
        Ok(())
    }

    // ========================================================================
    // Capabilities and time
    // ========================================================================

    /// Whether the backend re-registers orders atomically (read live)
    pub fn is_support_atomic_re_register(&self) -> Result<bool> {
        self.adapter.is_support_atomic_re_register()
    }

    /// Start the market-time driver
    pub fn start_market_timer(&mut self) -> Result<()> {
        debug!("[{}] Starting {}", self.name, self.time_source.name());
        self.time_source.start()?;
        Ok(())
    }

    /// Stop the market-time driver; always safe to call
    pub fn stop_market_timer(&mut self) {
        self.time_source.stop();
    }

    pub fn is_market_timer_running(&self) -> bool {
        self.time_source.is_running()
    }

    /// Move simulated time to `time`
    pub fn advance_time(&self, time: Timestamp) -> Result<()> {
        debug!("[{}] {} -> {}", self.name, Subjects::TIME, time);
        self.send_in_message(Message::Time(time))
    }

    /// Simulated time as seen by the emulator
    pub fn current_time(&self) -> Result<Timestamp> {
        Ok(self.adapter.emulator()?.current_time())
    }

    // ========================================================================
    // Adapter side
    // ========================================================================

    /// Subscribe to market data and subscription responses
    pub fn market_data(&self) -> ChannelSubscriber<OutMessage> {
        self.output.subscribe()
    }

    /// Subscribe to adapter output published on subjects matching `pattern`
    pub fn market_data_on(&self, pattern: impl Into<String>) -> ChannelSubscriber<OutMessage> {
        self.output.subscribe_to(pattern)
    }

    /// Let the adapter process every queued message, in order
    ///
    /// Returns the number of messages processed. Adapter output is
    /// published to [`market_data`](Self::market_data) subscribers.
    pub async fn pump(&mut self) -> Result<usize> {
        let inbound = self.inbound.as_mut().ok_or_else(|| {
            ConnectorError::NotInitialized(format!("connector '{}' has no inbound channel", self.name))
        })?;

        let mut processed = 0;
        while let Some(msg) = inbound.try_next()? {
            let out = self.adapter.handle(msg)?;
            publish(&self.output, out).await?;
            processed += 1;
        }

        if processed > 0 {
            debug!("[{}] Processed {} inbound messages", self.name, processed);
        }
        Ok(processed)
    }
}

async fn publish(output: &ChannelPublisher<OutMessage>, messages: Vec<OutMessage>) -> Result<()> {
    if !output.has_subscribers() {
        return Ok(());
    }
    for msg in &messages {
        output.publish_to(&msg.subject(), msg).await?;
    }
    Ok(())
}

impl Drop for EmulationConnector {
    fn drop(&mut self) {
        self.time_source.stop();
    }
}
