//! Application core: the four workers and the ports they talk through.
//!
//! All interaction with indicators, sensors, and logging happens through
//! traits, keeping the workers testable without real peripherals.

pub mod events;
pub mod ports;
pub mod workers;
