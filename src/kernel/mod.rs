//! Host kernel substrate.
//!
//! Stands in for the RTOS the control unit normally runs on: a thread table
//! of fixed capacity, a kernel state machine, and a priority gate that
//! orders worker actions the way a priority-preemptive scheduler would.
//!
//! ```text
//!   Inactive ──initialize──▶ Ready ──start──▶ Running
//!                              │
//!                              └─ spawn(): threads created, parked on the gate
//! ```

pub mod gate;
pub mod thread;

use std::sync::Arc;

use log::{error, info};
use parking_lot::Mutex;

use crate::config::SystemConfig;
use crate::error::{BootError, Result};
pub use gate::{GateGuard, PriorityGate};
pub use thread::ThreadSpec;

/// Hard upper bound on the number of kernel threads.
pub const MAX_THREADS: usize = 8;

/// Thread priority, lowest first.  Ordering follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Idle,
    Low,
    BelowNormal,
    Normal,
    AboveNormal,
    High,
    Realtime,
}

impl Priority {
    pub const COUNT: usize = 7;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Idle,
        Self::Low,
        Self::BelowNormal,
        Self::Normal,
        Self::AboveNormal,
        Self::High,
        Self::Realtime,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelState {
    /// Not initialised.
    Inactive,
    /// Initialised; threads may be created but do not run yet.
    Ready,
    /// Started; threads are running.
    Running,
}

/// The kernel: thread table, state, and dispatch gate.
#[derive(Debug)]
pub struct Kernel {
    state: Mutex<KernelState>,
    gate: Arc<PriorityGate>,
    threads: Mutex<heapless::Vec<ThreadSpec, MAX_THREADS>>,
    thread_limit: usize,
}

impl Kernel {
    /// A kernel that has not been initialised.
    pub fn new(thread_limit: usize) -> Self {
        Self {
            state: Mutex::new(KernelState::Inactive),
            gate: Arc::new(PriorityGate::new()),
            threads: Mutex::new(heapless::Vec::new()),
            thread_limit: thread_limit.min(MAX_THREADS),
        }
    }

    /// Create and initialise a kernel sized from `config`.
    pub fn initialize(config: &SystemConfig) -> Self {
        let kernel = Self::new(config.max_threads);
        *kernel.state.lock() = KernelState::Ready;
        info!("Kernel initialised (threads <= {})", kernel.thread_limit);
        kernel
    }

    pub fn state(&self) -> KernelState {
        *self.state.lock()
    }

    pub fn gate(&self) -> &Arc<PriorityGate> {
        &self.gate
    }

    /// Create a thread.  It stays parked until [`start`](Self::start).
    pub fn spawn(&self, spec: ThreadSpec, entry: impl FnOnce() + Send + 'static) -> Result<()> {
        let mut threads = self.threads.lock();
        if threads.len() >= self.thread_limit {
            error!("thread table full, cannot create '{}'", spec.name);
            return Err(BootError::ThreadsExhausted.into());
        }
        thread::spawn(&spec, Arc::clone(&self.gate), entry)?;
        threads
            .push(spec)
            .map_err(|_| BootError::ThreadsExhausted)?;
        Ok(())
    }

    /// Specs of every thread created so far, in creation order.
    pub fn threads(&self) -> Vec<ThreadSpec> {
        self.threads.lock().iter().cloned().collect()
    }

    /// Start scheduling.  Refuses unless the kernel is `Ready`.
    pub fn start(&self) -> Result<()> {
        let mut state = self.state.lock();
        if *state != KernelState::Ready {
            error!("kernel start refused in state {:?}", *state);
            return Err(BootError::KernelNotReady.into());
        }
        *state = KernelState::Running;
        drop(state);
        self.gate.open();
        info!("Kernel running with {} threads", self.threads.lock().len());
        Ok(())
    }
}
