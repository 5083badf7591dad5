//! Brake worker.
//!
//! Blocks on `brake`; each wake decelerates by one step and asserts the
//! brake indicator.  Highest priority of all workers: braking is
//! safety-relevant and goes ahead of everything else.
//!
//! Deceleration is not clamped at zero.  Leaving the `0..=max_speed` band
//! is reported, not corrected.

use embedded_hal::digital::OutputPin;
use log::{info, warn};

use super::{BRAKE_PRESSED, Worker, WorkerContext};
use crate::app::events::VcuEvent;
use crate::drivers::indicator::assert_line;
use crate::error::WaitError;
use crate::kernel::Priority;
use crate::signals::{FlagHandle, Timeout};

pub struct BrakeWorker<P> {
    pin: P,
    brake_pressed: FlagHandle,
    step_kmh: f64,
}

impl<P: OutputPin> BrakeWorker<P> {
    pub fn new(pin: P, brake_pressed: FlagHandle, step_kmh: f64) -> Self {
        Self {
            pin,
            brake_pressed,
            step_kmh,
        }
    }
}

impl<P: OutputPin + Send + 'static> Worker for BrakeWorker<P> {
    fn name(&self) -> &'static str {
        "brake"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn block(&mut self, timeout: Timeout) -> Result<(), WaitError> {
        self.brake_pressed.wait_any(BRAKE_PRESSED, timeout).map(drop)
    }

    fn act(&mut self, cx: &WorkerContext) {
        let speed_kmh = cx.vehicle.decelerate(self.step_kmh);
        let owner = self.name();
        assert_line(&mut self.pin, owner);
        if cx.vehicle.speed_within_limits() {
            info!("brake: speed now {:.1} km/h", speed_kmh);
        } else {
            warn!(
                "brake: speed {:.1} km/h outside 0..={:.1}",
                speed_kmh,
                cx.vehicle.max_speed()
            );
        }
        cx.sink.emit(&VcuEvent::Braked { speed_kmh });
    }
}
