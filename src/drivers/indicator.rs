//! Indicator output lines.
//!
//! One binary output per worker.  Each line is driven through the
//! `embedded-hal` [`OutputPin`] / [`StatefulOutputPin`] traits and owned by
//! exactly one worker, so no two workers ever drive the same line.
//!
//! ## Dual-target design
//!
//! On hardware: any HAL pin type implementing the `embedded-hal` traits.
//! On host/test: [`SimPin`] tracks the level in memory and hands out
//! read-only [`PinProbe`]s so tests can observe it.

use core::convert::Infallible;
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};
use log::warn;

// ── Simulated pin ─────────────────────────────────────────────

#[derive(Debug, Default)]
struct Line {
    high: AtomicBool,
    /// Number of low→high transitions.
    rising_edges: AtomicU32,
}

/// In-memory output line.
#[derive(Debug, Default)]
pub struct SimPin {
    line: Arc<Line>,
}

/// Read-only view of a [`SimPin`].
#[derive(Debug, Clone)]
pub struct PinProbe {
    line: Arc<Line>,
}

impl SimPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn probe(&self) -> PinProbe {
        PinProbe {
            line: Arc::clone(&self.line),
        }
    }

    fn drive(&self, high: bool) {
        let was_high = self.line.high.swap(high, Ordering::AcqRel);
        if high && !was_high {
            self.line.rising_edges.fetch_add(1, Ordering::Relaxed);
        }
    }
}

impl PinProbe {
    pub fn is_high(&self) -> bool {
        self.line.high.load(Ordering::Acquire)
    }

    pub fn rising_edges(&self) -> u32 {
        self.line.rising_edges.load(Ordering::Relaxed)
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true);
        Ok(())
    }
}

impl StatefulOutputPin for SimPin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.line.high.load(Ordering::Acquire))
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.line.high.load(Ordering::Acquire))
    }
}

// ── Indicator bank ────────────────────────────────────────────

/// The four worker indicator lines, before they are handed out.
#[derive(Debug)]
pub struct Indicators<P> {
    pub radio: P,
    pub temperature: P,
    pub climate: P,
    pub brake: P,
}

impl<P: OutputPin> Indicators<P> {
    /// Drive every line low.  Called once at boot before any worker runs.
    pub fn reset_all(&mut self) {
        for (name, pin) in [
            ("radio", &mut self.radio),
            ("temperature", &mut self.temperature),
            ("climate", &mut self.climate),
            ("brake", &mut self.brake),
        ] {
            if let Err(e) = pin.set_low() {
                warn!("indicator '{}' reset failed: {:?}", name, e);
            }
        }
    }
}

/// Probes for a bank of [`SimPin`]s.
#[derive(Debug, Clone)]
pub struct IndicatorProbes {
    pub radio: PinProbe,
    pub temperature: PinProbe,
    pub climate: PinProbe,
    pub brake: PinProbe,
}

impl Indicators<SimPin> {
    /// Four fresh simulated lines plus probes to watch them.
    pub fn simulated() -> (Self, IndicatorProbes) {
        let bank = Self {
            radio: SimPin::new(),
            temperature: SimPin::new(),
            climate: SimPin::new(),
            brake: SimPin::new(),
        };
        let probes = IndicatorProbes {
            radio: bank.radio.probe(),
            temperature: bank.temperature.probe(),
            climate: bank.climate.probe(),
            brake: bank.brake.probe(),
        };
        (bank, probes)
    }
}

/// Assert `pin`, logging instead of failing: a stuck indicator must not stop
/// the worker that owns it.
pub fn assert_line<P: OutputPin>(pin: &mut P, owner: &str) {
    if let Err(e) = pin.set_high() {
        warn!("{}: indicator set failed: {:?}", owner, e);
    }
}
