//! Simulated brake pedal.
//!
//! An external producer for the `brake` flag: presses the pedal once per
//! interval on its own thread.  Not a kernel worker.

use std::thread::JoinHandle;
use std::time::Duration;

use log::debug;

use crate::app::workers::BRAKE_PRESSED;
use crate::signals::FlagHandle;

pub fn spawn(brake: FlagHandle, interval: Duration) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("brake pedal".into())
        .spawn(move || {
            loop {
                std::thread::sleep(interval);
                debug!("pedal pressed");
                brake.raise(BRAKE_PRESSED);
            }
        })
}
