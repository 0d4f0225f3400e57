use hermes_core::Timestamp;
use hermes_ports::Clock;
use parking_lot::RwLock;

/// Clock that only moves when simulated data says so
///
/// Time is monotonic: attempts to move it backwards are ignored.
pub struct SimulatedClock {
    current: RwLock<Timestamp>,
}

impl SimulatedClock {
    /// Create a clock frozen at `start`
    pub fn new(start: Timestamp) -> Self {
        Self {
            current: RwLock::new(start),
        }
    }

    /// Move the clock to `time`
    ///
    /// Returns false (and leaves the clock untouched) if `time` is in the past.
    pub fn advance_to(&self, time: Timestamp) -> bool {
        let mut current = self.current.write();
        if time < *current {
            return false;
        }
        *current = time;
        true
    }
}

impl Clock for SimulatedClock {
    fn now(&self) -> Timestamp {
        *self.current.read()
    }

    fn name(&self) -> &str {
        "SimulatedClock"
    }
}
