//! Product id generation.
//!
//! Ids are derived from the wall clock (milliseconds since the Unix epoch)
//! but never repeat: each id is strictly greater than the last one handed
//! out or observed, so two creations inside the same millisecond still get
//! distinct ids.

use crate::types::ProductId;
use std::time::{SystemTime, UNIX_EPOCH};

/// Clock source returning milliseconds since the Unix epoch.
pub type Clock = fn() -> u64;

/// Milliseconds since the Unix epoch from the system clock.
///
/// A clock set before the epoch reads as zero; monotonicity is still
/// guaranteed by [`IdGenerator`].
pub fn system_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Monotonic, clock-derived id generator.
#[derive(Clone, Debug)]
pub struct IdGenerator {
    clock: Clock,
    last: u64,
}

impl IdGenerator {
    /// Generator backed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(system_millis)
    }

    /// Generator backed by a custom clock.
    pub fn with_clock(clock: Clock) -> Self {
        Self { clock, last: 0 }
    }

    /// Produce the next id: `max(now, last + 1)`.
    ///
    /// Returns `None` once `u64::MAX` has been handed out or observed.
    pub fn next(&mut self) -> Option<ProductId> {
        let id = (self.clock)().max(self.last.checked_add(1)?);
        self.last = id;
        Some(ProductId(id))
    }

    /// Record an id that entered the collection from elsewhere.
    pub fn observe(&mut self, id: ProductId) {
        self.last = self.last.max(id.0);
    }

    /// Forget previous ids and reseed from a collection.
    pub fn reseed<'a>(&mut self, ids: impl IntoIterator<Item = &'a ProductId>) {
        self.last = ids.into_iter().map(|id| id.0).max().unwrap_or(0);
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
