//! System bring-up.
//!
//! ```text
//!   Kernel::initialize ─▶ reset indicators ─▶ create flags ─▶ assemble vehicle
//!          ─▶ spawn radio, temperature, air conditioner, brake ─▶ SystemContext
//! ```
//!
//! [`boot`] returns an explicit [`SystemContext`] instead of filling
//! globals.  Any failure aborts bring-up immediately and is never retried.
//! Threads created before the failure stay parked on the closed gate, so
//! no partial worker set ever runs.  [`SystemContext::start`] starts the
//! kernel only when it reports `Ready`.

use std::sync::Arc;
use std::time::Duration;

use embedded_hal::digital::StatefulOutputPin;
use log::info;

use crate::app::events::VcuEvent;
use crate::app::ports::{EventSink, TemperatureProbe};
use crate::app::workers::{
    self, BRAKE_PRESSED, BrakeWorker, ClimateWorker, RadioWorker, TemperatureWorker, Worker,
    WorkerContext,
};
use crate::config::SystemConfig;
use crate::drivers::indicator::Indicators;
use crate::error::Result;
use crate::kernel::{Kernel, ThreadSpec};
use crate::signals::{FlagHandle, SignalBus};
use crate::vehicle::VehicleState;

pub const TOO_HOT_FLAG: &str = "too hot";
pub const BRAKE_FLAG: &str = "brake";

/// Everything created at boot, alive for the rest of the process.
pub struct SystemContext {
    pub kernel: Kernel,
    pub bus: SignalBus,
    pub vehicle: Arc<VehicleState>,
    pub too_hot: FlagHandle,
    pub brake_pressed: FlagHandle,
    sink: Arc<dyn EventSink>,
}

impl SystemContext {
    /// Start the kernel.  Refused unless it reports `Ready`.
    pub fn start(&self) -> Result<()> {
        self.kernel.start()?;
        self.sink.emit(&VcuEvent::Started {
            threads: self.kernel.threads().len(),
        });
        Ok(())
    }

    /// External brake input.
    pub fn press_brake(&self) {
        self.brake_pressed.raise(BRAKE_PRESSED);
    }

    pub fn sink(&self) -> &Arc<dyn EventSink> {
        &self.sink
    }
}

/// Bring the system up to the point just before the kernel starts.
///
/// `probe` builds the temperature probe once the vehicle exists, so a
/// simulated probe can observe it.
pub fn boot<P, T>(
    config: &SystemConfig,
    mut indicators: Indicators<P>,
    probe: impl FnOnce(&Arc<VehicleState>) -> T,
    sink: Arc<dyn EventSink>,
) -> Result<SystemContext>
where
    P: StatefulOutputPin + Send + 'static,
    T: TemperatureProbe + 'static,
{
    config.validate()?;

    let kernel = Kernel::initialize(config);
    indicators.reset_all();

    let bus = SignalBus::new(config.max_flags);
    let too_hot = bus.create(TOO_HOT_FLAG)?;
    let brake_pressed = bus.create(BRAKE_FLAG)?;

    let vehicle = Arc::new(VehicleState::from_config(config));
    let cx = WorkerContext {
        vehicle: Arc::clone(&vehicle),
        gate: Arc::clone(kernel.gate()),
        sink: Arc::clone(&sink),
    };
    let Indicators {
        radio,
        temperature,
        climate,
        brake,
    } = indicators;
    let stack_kb = config.worker_stack_kb;

    spawn_worker(
        &kernel,
        stack_kb,
        RadioWorker::new(radio, Duration::from_millis(config.radio_poll_interval_ms)),
        cx.clone(),
    )?;
    spawn_worker(
        &kernel,
        stack_kb,
        TemperatureWorker::new(
            temperature,
            probe(&vehicle),
            too_hot.clone(),
            config.too_hot_threshold_c,
            Duration::from_millis(config.temperature_sample_interval_ms),
        ),
        cx.clone(),
    )?;
    spawn_worker(
        &kernel,
        stack_kb,
        ClimateWorker::new(climate, too_hot.clone(), config.cool_step_c),
        cx.clone(),
    )?;
    spawn_worker(
        &kernel,
        stack_kb,
        BrakeWorker::new(brake, brake_pressed.clone(), config.brake_step_kmh),
        cx,
    )?;

    info!(
        "Boot complete: {} flags, {} threads",
        bus.len(),
        kernel.threads().len()
    );

    Ok(SystemContext {
        kernel,
        bus,
        vehicle,
        too_hot,
        brake_pressed,
        sink,
    })
}

fn spawn_worker<W: Worker>(
    kernel: &Kernel,
    stack_kb: usize,
    worker: W,
    cx: WorkerContext,
) -> Result<()> {
    let spec = ThreadSpec::new(worker.name(), worker.priority(), stack_kb);
    kernel.spawn(spec, move || {
        workers::run(worker, cx);
    })
}
