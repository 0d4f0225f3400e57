use crate::error::TimeSourceResult;

/// Port for the connector's market-time driver
///
/// A live connector arms a periodic timer that reports wall-clock time;
/// an emulation connector receives time from simulated data instead and
/// plugs in an implementation that never arms anything.
///
/// Both `start` and `stop` must be safe to call repeatedly.
pub trait TimeSource: Send {
    /// Arm the time source
    fn start(&mut self) -> TimeSourceResult<()>;

    /// Disarm the time source
    fn stop(&mut self);

    /// Whether a timer is currently armed
    fn is_running(&self) -> bool;

    /// Identifier for debugging
    fn name(&self) -> &str {
        "TimeSource"
    }
}
