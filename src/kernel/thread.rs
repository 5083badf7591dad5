//! Named, prioritised thread creation.
//!
//! On the host, `std::thread` gives us named threads with an explicit stack
//! size but no native priority.  Priority is carried by the
//! [`PriorityGate`](super::gate::PriorityGate) instead: each spawned thread
//! parks on the gate until the kernel starts, then runs its entry point,
//! which dispatches its work through the gate at its own priority.

use std::sync::Arc;

use log::{error, info};

use super::Priority;
use super::gate::PriorityGate;
use crate::error::{BootError, Result};

/// Bounded thread name.
pub type ThreadName = heapless::String<24>;

/// The `(name, priority, stack)` tuple a thread is created with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadSpec {
    pub name: ThreadName,
    pub priority: Priority,
    pub stack_kb: usize,
}

impl ThreadSpec {
    pub fn new(name: &str, priority: Priority, stack_kb: usize) -> Self {
        Self {
            name: crate::signals::bounded_name(name),
            priority,
            stack_kb,
        }
    }

    /// Stack size in bytes, or `None` if it does not fit in `usize`.
    pub fn stack_bytes(&self) -> Option<usize> {
        self.stack_kb.checked_mul(1024)
    }
}

/// Spawn `entry` on a new OS thread that waits for the gate to open before
/// running.  The join handle is dropped: kernel threads live for the
/// process lifetime.
pub(super) fn spawn(
    spec: &ThreadSpec,
    gate: Arc<PriorityGate>,
    entry: impl FnOnce() + Send + 'static,
) -> Result<()> {
    info!(
        "Spawning '{}' (pri={:?}, stack={}KB)",
        spec.name, spec.priority, spec.stack_kb
    );

    let Some(stack_bytes) = spec.stack_bytes() else {
        error!("thread '{}' stack of {}KB is not addressable", spec.name, spec.stack_kb);
        return Err(BootError::ThreadSpawnFailed.into());
    };

    std::thread::Builder::new()
        .name(spec.name.as_str().into())
        .stack_size(stack_bytes)
        .spawn(move || {
            gate.await_open();
            entry();
        })
        .map(drop)
        .map_err(|e| {
            error!("thread '{}' creation failed: {}", spec.name, e);
            BootError::ThreadSpawnFailed.into()
        })
}
