//! Worker tasks.
//!
//! Every worker is an endless loop with two states:
//!
//! ```text
//!          trigger (flag raised / period elapsed)
//!   ┌─────────┐ ─────────────────────────────▶ ┌────────┐
//!   │ BLOCKED │                                │ ACTIVE │
//!   └─────────┘ ◀───────────────────────────── └────────┘
//!                     action done
//! ```
//!
//! The ACTIVE phase runs inside the kernel's priority gate, so when several
//! workers become runnable together the higher-priority action goes first:
//! Brake (High) > Climate (AboveNormal) > Temperature, Radio (Normal).

pub mod brake;
pub mod climate;
pub mod radio;
pub mod temperature;

use std::sync::Arc;

use log::{info, warn};

use super::ports::EventSink;
use crate::error::WaitError;
use crate::kernel::{Priority, PriorityGate};
use crate::signals::Timeout;
use crate::vehicle::VehicleState;

pub use brake::BrakeWorker;
pub use climate::ClimateWorker;
pub use radio::RadioWorker;
pub use temperature::TemperatureWorker;

/// Bit raised on the `too hot` flag.
pub const TOO_HOT: u32 = 0x01;
/// Bit raised on the `brake` flag.
pub const BRAKE_PRESSED: u32 = 0x01;

/// Everything a worker shares with the others, handed over at spawn time.
#[derive(Clone)]
pub struct WorkerContext {
    pub vehicle: Arc<VehicleState>,
    pub gate: Arc<PriorityGate>,
    pub sink: Arc<dyn EventSink>,
}

pub trait Worker: Send + 'static {
    /// Thread name.
    fn name(&self) -> &'static str;

    fn priority(&self) -> Priority;

    /// BLOCKED phase: wait for the trigger.  Flag-driven workers honour
    /// `timeout`; periodic workers sleep one period and ignore it.
    fn block(&mut self, timeout: Timeout) -> Result<(), WaitError>;

    /// ACTIVE phase: one unit of work.
    fn act(&mut self, cx: &WorkerContext);
}

/// Run one BLOCKED → ACTIVE cycle.
pub fn cycle<W: Worker + ?Sized>(
    worker: &mut W,
    cx: &WorkerContext,
    timeout: Timeout,
) -> Result<(), WaitError> {
    worker.block(timeout)?;
    let _running = cx.gate.enter(worker.priority());
    worker.act(cx);
    Ok(())
}

/// Thread entry point.  Never returns.
pub fn run<W: Worker>(mut worker: W, cx: WorkerContext) -> ! {
    info!("{} running at {:?}", worker.name(), worker.priority());
    loop {
        if let Err(e) = cycle(&mut worker, &cx, Timeout::Forever) {
            warn!("{}: {}", worker.name(), e);
        }
    }
}
