//! System configuration parameters
//!
//! All tunable parameters for the vehicle control unit.  Values can be
//! overridden by a JSON file passed to the binary; missing fields fall back
//! to [`SystemConfig::default`].

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::kernel::MAX_THREADS;
use crate::signals::MAX_FLAGS;

/// Largest per-worker stack accepted from configuration (KiB).
pub const MAX_WORKER_STACK_KB: usize = 16 * 1024;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Vehicle ---
    /// Top speed (km/h), fixed for the lifetime of the vehicle
    pub max_speed_kmh: f64,
    /// Speed at assembly time (km/h)
    pub initial_speed_kmh: f64,
    /// Cabin temperature at assembly time (Celsius)
    pub initial_temperature_c: f64,
    /// Radio frequency at assembly time (MHz)
    pub radio_frequency_mhz: f64,

    // --- Climate ---
    /// Sampled temperature (Celsius) above which `too_hot` is raised
    pub too_hot_threshold_c: f64,
    /// Temperature drop applied per air-conditioner wake (Celsius)
    pub cool_step_c: f64,

    // --- Brake ---
    /// Speed reduction applied per brake wake (km/h)
    pub brake_step_kmh: f64,

    // --- Timing ---
    /// Temperature sampling interval (milliseconds)
    pub temperature_sample_interval_ms: u64,
    /// Radio poll interval (milliseconds)
    pub radio_poll_interval_ms: u64,
    /// Telemetry report interval (milliseconds)
    pub telemetry_interval_ms: u64,

    // --- Kernel ---
    /// Thread table size (at most [`MAX_THREADS`])
    pub max_threads: usize,
    /// Event flag slots (at most [`MAX_FLAGS`])
    pub max_flags: usize,
    /// Stack size per worker thread (KiB, at most [`MAX_WORKER_STACK_KB`])
    pub worker_stack_kb: usize,

    // --- Simulation ---
    /// Cabin heating added per temperature sample by the simulated probe
    pub sim_solar_load_c: f64,
    /// Simulated brake pedal period (milliseconds, 0 = never pressed)
    pub sim_brake_interval_ms: u64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Vehicle
            max_speed_kmh: 200.0,
            initial_speed_kmh: 0.0,
            initial_temperature_c: 20.0,
            radio_frequency_mhz: 100.0,

            // Climate
            too_hot_threshold_c: 30.0,
            cool_step_c: 1.0,

            // Brake
            brake_step_kmh: 5.0,

            // Timing
            temperature_sample_interval_ms: 500, // 2 Hz
            radio_poll_interval_ms: 250,         // 4 Hz
            telemetry_interval_ms: 5000,         // 1/5s

            // Kernel
            max_threads: MAX_THREADS,
            max_flags: MAX_FLAGS,
            worker_stack_kb: 64,

            // Simulation
            sim_solar_load_c: 0.5,
            sim_brake_interval_ms: 0,
        }
    }
}

impl SystemConfig {
    /// Parse a JSON document.  Absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            warn!("config parse failed: {}", e);
            Error::Config("malformed JSON")
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject out-of-range values.  Nothing is clamped.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            self.max_speed_kmh,
            self.initial_speed_kmh,
            self.initial_temperature_c,
            self.radio_frequency_mhz,
            self.too_hot_threshold_c,
            self.cool_step_c,
            self.brake_step_kmh,
            self.sim_solar_load_c,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(Error::Config("values must be finite"));
        }
        if self.max_speed_kmh <= 0.0 {
            return Err(Error::Config("max_speed_kmh must be positive"));
        }
        if self.cool_step_c < 0.0 || self.brake_step_kmh < 0.0 {
            return Err(Error::Config("step sizes must not be negative"));
        }
        if self.temperature_sample_interval_ms == 0
            || self.radio_poll_interval_ms == 0
            || self.telemetry_interval_ms == 0
        {
            return Err(Error::Config("periodic intervals must be non-zero"));
        }
        if self.max_threads > MAX_THREADS {
            return Err(Error::Config("max_threads exceeds thread table capacity"));
        }
        if self.max_flags > MAX_FLAGS {
            return Err(Error::Config("max_flags exceeds signal bus capacity"));
        }
        if self.worker_stack_kb == 0 {
            return Err(Error::Config("worker_stack_kb must be non-zero"));
        }
        if self.worker_stack_kb > MAX_WORKER_STACK_KB {
            return Err(Error::Config("worker_stack_kb exceeds stack limit"));
        }
        Ok(())
    }
}
