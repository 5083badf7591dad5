//! Simulated cabin temperature probe.
//!
//! Stands in for a real sensor driver: each sample adds a fixed solar load
//! to the vehicle's cabin temperature and reports the result.  With a
//! positive load and the air conditioner running, the cabin settles around
//! the too-hot threshold.

use std::sync::Arc;

use crate::app::ports::TemperatureProbe;
use crate::vehicle::VehicleState;

pub struct CabinProbe {
    vehicle: Arc<VehicleState>,
    solar_load_c: f64,
}

impl CabinProbe {
    pub fn new(vehicle: Arc<VehicleState>, solar_load_c: f64) -> Self {
        Self {
            vehicle,
            solar_load_c,
        }
    }
}

impl TemperatureProbe for CabinProbe {
    fn sample(&mut self) -> f64 {
        if self.solar_load_c == 0.0 {
            self.vehicle.temperature()
        } else {
            self.vehicle.heat(self.solar_load_c)
        }
    }
}
