//! Car radio state.

use core::sync::atomic::{AtomicBool, Ordering};

use super::cell::AtomicF64;

/// Frequency the radio is tuned to at assembly time (MHz).
pub const DEFAULT_FREQUENCY_MHZ: f64 = 100.0;

/// Power and tuning of the radio.  Owned by
/// [`VehicleState`](super::VehicleState) and reachable only through it.
///
/// No range is enforced on the frequency.
#[derive(Debug)]
pub struct RadioState {
    on: AtomicBool,
    frequency_mhz: AtomicF64,
}

impl RadioState {
    pub fn new(on: bool, frequency_mhz: f64) -> Self {
        Self {
            on: AtomicBool::new(on),
            frequency_mhz: AtomicF64::new(frequency_mhz),
        }
    }

    pub fn is_on(&self) -> bool {
        self.on.load(Ordering::Acquire)
    }

    /// Switch the radio on (`true`) or off (`false`).
    pub fn turn_on(&self, on: bool) {
        self.on.store(on, Ordering::Release);
    }

    pub fn turn_off(&self) {
        self.turn_on(false);
    }

    /// Tuned frequency in MHz.
    pub fn frequency(&self) -> f64 {
        self.frequency_mhz.load()
    }

    pub fn set_frequency(&self, frequency_mhz: f64) {
        self.frequency_mhz.store(frequency_mhz);
    }
}

impl Default for RadioState {
    fn default() -> Self {
        Self::new(false, DEFAULT_FREQUENCY_MHZ)
    }
}
