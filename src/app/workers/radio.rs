//! Radio worker: background poll of the radio.
//!
//! While the radio is on the indicator blinks, one toggle per poll.  While
//! it is off the indicator is held low.

use std::time::Duration;

use embedded_hal::digital::StatefulOutputPin;
use log::{debug, warn};

use super::{Worker, WorkerContext};
use crate::error::WaitError;
use crate::kernel::Priority;
use crate::signals::Timeout;

pub struct RadioWorker<P> {
    pin: P,
    period: Duration,
}

impl<P: StatefulOutputPin> RadioWorker<P> {
    pub fn new(pin: P, period: Duration) -> Self {
        Self { pin, period }
    }
}

impl<P: StatefulOutputPin + Send + 'static> Worker for RadioWorker<P> {
    fn name(&self) -> &'static str {
        "radio"
    }

    fn priority(&self) -> Priority {
        Priority::Normal
    }

    fn block(&mut self, _timeout: Timeout) -> Result<(), WaitError> {
        std::thread::sleep(self.period);
        Ok(())
    }

    fn act(&mut self, cx: &WorkerContext) {
        let radio = cx.vehicle.radio();
        let on = radio.is_on();
        let result = if on {
            self.pin.toggle()
        } else {
            self.pin.set_low()
        };
        if let Err(e) = result {
            warn!("radio: indicator update failed: {:?}", e);
        }
        debug!("radio: on={} freq={:.1}MHz", on, radio.frequency());
    }
}
