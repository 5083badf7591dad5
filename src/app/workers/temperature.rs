//! Temperature worker: periodic cabin sampling.
//!
//! Every sample asserts the temperature indicator.  A sample strictly above
//! the configured threshold raises `too hot`, once per sample for as long
//! as the cabin stays hot, so the air conditioner keeps cooling until the
//! reading comes back down.  Events are emitted only on threshold crossings.

use std::time::Duration;

use embedded_hal::digital::OutputPin;
use log::{debug, info};

use super::{TOO_HOT, Worker, WorkerContext};
use crate::app::events::VcuEvent;
use crate::app::ports::TemperatureProbe;
use crate::drivers::indicator::assert_line;
use crate::error::WaitError;
use crate::kernel::Priority;
use crate::signals::{FlagHandle, Timeout};

pub struct TemperatureWorker<P, T> {
    pin: P,
    probe: T,
    too_hot: FlagHandle,
    threshold_c: f64,
    period: Duration,
    hot: bool,
}

impl<P: OutputPin, T: TemperatureProbe> TemperatureWorker<P, T> {
    pub fn new(pin: P, probe: T, too_hot: FlagHandle, threshold_c: f64, period: Duration) -> Self {
        Self {
            pin,
            probe,
            too_hot,
            threshold_c,
            period,
            hot: false,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold_c
    }
}

impl<P, T> Worker for TemperatureWorker<P, T>
where
    P: OutputPin + Send + 'static,
    T: TemperatureProbe + 'static,
{
    fn name(&self) -> &'static str {
        "temperature sensor"
    }

    fn priority(&self) -> Priority {
        Priority::Normal
    }

    fn block(&mut self, _timeout: Timeout) -> Result<(), WaitError> {
        std::thread::sleep(self.period);
        Ok(())
    }

    fn act(&mut self, cx: &WorkerContext) {
        let temperature_c = self.probe.sample();
        let owner = self.name();
        assert_line(&mut self.pin, owner);
        debug!("temperature: {:.1}\u{00b0}C", temperature_c);

        if temperature_c > self.threshold_c {
            self.too_hot.raise(TOO_HOT);
            if !self.hot {
                info!(
                    "temperature: {:.1}\u{00b0}C above {:.1}\u{00b0}C, requesting cooling",
                    temperature_c, self.threshold_c
                );
                cx.sink.emit(&VcuEvent::TooHot {
                    temperature_c,
                    threshold_c: self.threshold_c,
                });
            }
            self.hot = true;
        } else {
            if self.hot {
                cx.sink.emit(&VcuEvent::TemperatureNormal { temperature_c });
            }
            self.hot = false;
        }
    }
}
