//! Mock adapters for integration tests.
//!
//! Records every emitted event so tests can assert on the full history, and
//! provides a probe whose reading the test controls, without touching real
//! sensors or output lines.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use vcu::app::events::VcuEvent;
use vcu::app::ports::{EventSink, TemperatureProbe};
use vcu::config::SystemConfig;

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<VcuEvent>>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<VcuEvent> {
        self.events.lock().clone()
    }

    pub fn count(&self, pred: impl Fn(&VcuEvent) -> bool) -> usize {
        self.events.lock().iter().filter(|e| pred(e)).count()
    }

    /// Poll until at least `n` recorded events satisfy `pred`.
    pub fn wait_for(&self, n: usize, pred: impl Fn(&VcuEvent) -> bool) -> bool {
        wait_until(Duration::from_secs(5), || self.count(&pred) >= n)
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &VcuEvent) {
        self.events.lock().push(event.clone());
    }
}

// ── ManualProbe ───────────────────────────────────────────────

/// Reports whatever the test last stored.
#[derive(Clone)]
pub struct ManualProbe {
    reading: Arc<Mutex<f64>>,
}

#[allow(dead_code)]
impl ManualProbe {
    pub fn new(celsius: f64) -> Self {
        Self {
            reading: Arc::new(Mutex::new(celsius)),
        }
    }

    pub fn set(&self, celsius: f64) {
        *self.reading.lock() = celsius;
    }
}

impl TemperatureProbe for ManualProbe {
    fn sample(&mut self) -> f64 {
        *self.reading.lock()
    }
}

// ── Helpers ───────────────────────────────────────────────────

/// Defaults with short periods so periodic workers cycle quickly.
pub fn fast_config() -> SystemConfig {
    SystemConfig {
        temperature_sample_interval_ms: 5,
        radio_poll_interval_ms: 5,
        telemetry_interval_ms: 50,
        sim_solar_load_c: 0.0,
        ..SystemConfig::default()
    }
}

pub fn wait_until(limit: Duration, cond: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + limit;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
    cond()
}
