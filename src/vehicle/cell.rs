//! Lock-free `f64` cell.
//!
//! Stores the IEEE-754 bit pattern in an `AtomicU64`.  Read-modify-write
//! updates go through `fetch_update`, so two threads adjusting the same
//! field never lose an update.

use core::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
pub(crate) struct AtomicF64(AtomicU64);

impl AtomicF64 {
    pub(crate) fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    pub(crate) fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn store(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Release);
    }

    /// Atomically add `delta` and return the new value.
    pub(crate) fn add(&self, delta: f64) -> f64 {
        let update = |bits: u64| Some((f64::from_bits(bits) + delta).to_bits());
        // The closure never returns `None`, so both arms carry the prior value.
        let (Ok(prev) | Err(prev)) =
            self.0
                .fetch_update(Ordering::AcqRel, Ordering::Acquire, update);
        f64::from_bits(prev) + delta
    }
}
