use hermes_ports::{TimeSource, TimeSourceResult};

/// Time source for emulation
///
/// Simulated time is advanced by the data fed to the emulator, so no
/// wall-clock timer is ever armed. `start` and `stop` do nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTimeSource;

impl TimeSource for NoopTimeSource {
    fn start(&mut self) -> TimeSourceResult<()> {
        Ok(())
    }

    fn stop(&mut self) {}

    fn is_running(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "NoopTimeSource"
    }
}
