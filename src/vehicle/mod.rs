//! Shared vehicle state.
//!
//! One [`VehicleState`] is built before any worker starts and handed to
//! every worker as an `Arc`.  Each field is an atomic cell and every
//! mutator, including the read-modify-write ones (`accelerate`, `cool`,
//! ...), is a single atomic update.  Workers therefore share the state
//! without locks and without data races.
//!
//! No range policy is applied: `set_speed` and friends assign whatever they
//! are given.  [`VehicleState::speed_within_limits`] lets callers check the
//! intended `0 ≤ speed ≤ max_speed` band.

mod cell;
pub mod radio;

use serde::{Deserialize, Serialize};

use crate::config::SystemConfig;
use cell::AtomicF64;
pub use radio::RadioState;

/// Speed and temperature of the vehicle plus its radio.
#[derive(Debug)]
pub struct VehicleState {
    max_speed_kmh: f64,
    speed_kmh: AtomicF64,
    temperature_c: AtomicF64,
    radio: RadioState,
}

/// A plain copy of every field, suitable for logging or transmission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleSnapshot {
    pub max_speed_kmh: f64,
    pub speed_kmh: f64,
    pub temperature_c: f64,
    pub radio_on: bool,
    pub radio_frequency_mhz: f64,
}

impl VehicleState {
    pub fn new(max_speed_kmh: f64, speed_kmh: f64, temperature_c: f64, radio: RadioState) -> Self {
        Self {
            max_speed_kmh,
            speed_kmh: AtomicF64::new(speed_kmh),
            temperature_c: AtomicF64::new(temperature_c),
            radio,
        }
    }

    /// Assemble the vehicle from configuration.  The radio starts off.
    pub fn from_config(config: &SystemConfig) -> Self {
        Self::new(
            config.max_speed_kmh,
            config.initial_speed_kmh,
            config.initial_temperature_c,
            RadioState::new(false, config.radio_frequency_mhz),
        )
    }

    // ── Speed ─────────────────────────────────────────────────

    pub fn max_speed(&self) -> f64 {
        self.max_speed_kmh
    }

    pub fn speed(&self) -> f64 {
        self.speed_kmh.load()
    }

    pub fn set_speed(&self, speed_kmh: f64) {
        self.speed_kmh.store(speed_kmh);
    }

    /// Add `delta` km/h.  Returns the new speed.
    pub fn accelerate(&self, delta_kmh: f64) -> f64 {
        self.speed_kmh.add(delta_kmh)
    }

    /// Subtract `delta` km/h.  Returns the new speed.
    pub fn decelerate(&self, delta_kmh: f64) -> f64 {
        self.accelerate(-delta_kmh)
    }

    /// True when `0 ≤ speed ≤ max_speed`.
    pub fn speed_within_limits(&self) -> bool {
        (0.0..=self.max_speed_kmh).contains(&self.speed())
    }

    // ── Temperature ───────────────────────────────────────────

    pub fn temperature(&self) -> f64 {
        self.temperature_c.load()
    }

    pub fn set_temperature(&self, temperature_c: f64) {
        self.temperature_c.store(temperature_c);
    }

    /// Add `delta` °C.  Returns the new temperature.
    pub fn heat(&self, delta_c: f64) -> f64 {
        self.temperature_c.add(delta_c)
    }

    /// Subtract `delta` °C.  Returns the new temperature.
    pub fn cool(&self, delta_c: f64) -> f64 {
        self.heat(-delta_c)
    }

    // ── Radio ─────────────────────────────────────────────────

    pub fn radio(&self) -> &RadioState {
        &self.radio
    }

    pub fn snapshot(&self) -> VehicleSnapshot {
        VehicleSnapshot {
            max_speed_kmh: self.max_speed_kmh,
            speed_kmh: self.speed(),
            temperature_c: self.temperature(),
            radio_on: self.radio.is_on(),
            radio_frequency_mhz: self.radio.frequency(),
        }
    }
}

impl Default for VehicleState {
    fn default() -> Self {
        Self::new(200.0, 0.0, 20.0, RadioState::default())
    }
}
