//! Air-conditioner worker.
//!
//! Blocks on `too hot`; each wake cools the cabin by one step and asserts
//! the climate indicator.

use embedded_hal::digital::OutputPin;
use log::info;

use super::{TOO_HOT, Worker, WorkerContext};
use crate::app::events::VcuEvent;
use crate::drivers::indicator::assert_line;
use crate::error::WaitError;
use crate::kernel::Priority;
use crate::signals::{FlagHandle, Timeout};

pub struct ClimateWorker<P> {
    pin: P,
    too_hot: FlagHandle,
    step_c: f64,
}

impl<P: OutputPin> ClimateWorker<P> {
    pub fn new(pin: P, too_hot: FlagHandle, step_c: f64) -> Self {
        Self { pin, too_hot, step_c }
    }
}

impl<P: OutputPin + Send + 'static> Worker for ClimateWorker<P> {
    fn name(&self) -> &'static str {
        "air conditioner"
    }

    fn priority(&self) -> Priority {
        Priority::AboveNormal
    }

    fn block(&mut self, timeout: Timeout) -> Result<(), WaitError> {
        self.too_hot.wait_any(TOO_HOT, timeout).map(drop)
    }

    fn act(&mut self, cx: &WorkerContext) {
        let temperature_c = cx.vehicle.cool(self.step_c);
        let owner = self.name();
        assert_line(&mut self.pin, owner);
        info!("air conditioner: cooled to {:.1}\u{00b0}C", temperature_c);
        cx.sink.emit(&VcuEvent::Cooled { temperature_c });
    }
}
