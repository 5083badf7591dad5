//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured events to the `log`
//! facade (stderr via `env_logger` in the host binary).

use log::info;

use crate::app::events::VcuEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`VcuEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&self, event: &VcuEvent) {
        match event {
            VcuEvent::Telemetry(t) => {
                info!(
                    "TELEM | speed={:.1}/{:.0}km/h | T={:.1}\u{00b0}C | radio={} @ {:.1}MHz",
                    t.speed_kmh,
                    t.max_speed_kmh,
                    t.temperature_c,
                    if t.radio_on { "ON" } else { "OFF" },
                    t.radio_frequency_mhz,
                );
            }
            VcuEvent::Started { threads } => {
                info!("START | threads={}", threads);
            }
            VcuEvent::TooHot {
                temperature_c,
                threshold_c,
            } => {
                info!(
                    "CLIMATE | too hot {:.1}\u{00b0}C > {:.1}\u{00b0}C",
                    temperature_c, threshold_c
                );
            }
            VcuEvent::TemperatureNormal { temperature_c } => {
                info!("CLIMATE | back to {:.1}\u{00b0}C", temperature_c);
            }
            VcuEvent::Cooled { temperature_c } => {
                info!("CLIMATE | cooled to {:.1}\u{00b0}C", temperature_c);
            }
            VcuEvent::Braked { speed_kmh } => {
                info!("BRAKE | speed={:.1}km/h", speed_kmh);
            }
        }
    }
}
