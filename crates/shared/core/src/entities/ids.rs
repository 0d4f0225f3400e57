use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic generator of transaction identifiers
///
/// Shared between the connector and its adapter; the adapter stamps
/// generated trades and order-log entries with ids drawn from it.
#[derive(Debug)]
pub struct TransactionIdGenerator {
    next: AtomicU64,
}

impl TransactionIdGenerator {
    /// Create a generator whose first id is `start`
    pub fn new(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }

    /// Draw the next id
    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    /// Peek at the id the next call will return
    pub fn current(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}

impl Default for TransactionIdGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}
