//! Outbound application events.
//!
//! Workers emit these through the [`EventSink`](super::ports::EventSink)
//! port.  Adapters on the other side decide what to do with them: log to
//! the console, record them in a test, and so on.

use crate::vehicle::VehicleSnapshot;

/// Structured events emitted by the control unit.
#[derive(Debug, Clone, PartialEq)]
pub enum VcuEvent {
    /// The kernel started with this many worker threads.
    Started { threads: usize },

    /// A temperature sample crossed above the threshold.
    TooHot { temperature_c: f64, threshold_c: f64 },

    /// A sample fell back to or below the threshold.
    TemperatureNormal { temperature_c: f64 },

    /// The air conditioner cooled the cabin to `temperature_c`.
    Cooled { temperature_c: f64 },

    /// The brake reduced speed to `speed_kmh`.
    Braked { speed_kmh: f64 },

    /// Periodic snapshot of the whole vehicle.
    Telemetry(VehicleSnapshot),
}
