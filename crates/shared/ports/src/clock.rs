use hermes_core::Timestamp;

/// Source of "now" for connectors and emulators
///
/// Live connectors read wall time; an emulator reads an instant that only
/// moves when simulated data advances it. Callers must not assume `now`
/// changes between two reads.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;

    /// Label used in log lines
    fn name(&self) -> &str {
        "Clock"
    }
}
