use hermes_core::Timestamp;
use hermes_ports::{Clock, TimeSource, TimeSourceError, TimeSourceResult};
use log::info;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Callback invoked with the clock's time on every timer tick
pub type TickHandler = Arc<dyn Fn(Timestamp) + Send + Sync>;

/// Periodic market-time driver for live connectors
///
/// Spawns a tokio interval task that reports `Clock::now()` to the tick
/// handler. Requires a running tokio runtime when started.
pub struct MarketTimer {
    interval: Duration,
    clock: Arc<dyn Clock>,
    on_tick: TickHandler,
    handle: Option<JoinHandle<()>>,
}

impl MarketTimer {
    pub fn new(
        interval: Duration,
        clock: Arc<dyn Clock>,
        on_tick: impl Fn(Timestamp) + Send + Sync + 'static,
    ) -> Self {
        Self {
            interval,
            clock,
            on_tick: Arc::new(on_tick),
            handle: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl TimeSource for MarketTimer {
    fn start(&mut self) -> TimeSourceResult<()> {
        if self.is_running() {
            return Ok(());
        }
        if self.interval.is_zero() {
            return Err(TimeSourceError::InvalidInterval(
                "interval must be positive".to_string(),
            ));
        }

        let runtime = Handle::try_current().map_err(|_| TimeSourceError::NoRuntime)?;

        let period = self.interval;
        let clock = self.clock.clone();
        let on_tick = self.on_tick.clone();

        info!(
            "Starting market timer on {} with interval of {}ms",
            clock.name(),
            period.as_millis()
        );

        self.handle = Some(runtime.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                on_tick(clock.now());
            }
        }));

        Ok(())
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!("Market timer stopped");
        }
    }

    fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn name(&self) -> &str {
        "MarketTimer"
    }
}

impl Drop for MarketTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
