//! Priority-arbitrated dispatch gate.
//!
//! The host scheduler gives no priority guarantees, so the kernel routes
//! every worker's ACTIVE phase through this gate.  At most one phase holds
//! the gate.  When it is released, the highest-priority waiter enters next.
//! A lower-priority thread never enters while a higher one is queued.
//!
//! The gate starts closed.  Threads created before [`PriorityGate::open`]
//! park in [`PriorityGate::await_open`] and the kernel opens it on start.

use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use super::Priority;

#[derive(Debug, Default)]
struct GateState {
    open: bool,
    holder: Option<Priority>,
    waiting: [usize; Priority::COUNT],
}

impl GateState {
    fn highest_waiting(&self) -> Option<Priority> {
        Priority::ALL
            .iter()
            .rev()
            .copied()
            .find(|p| self.waiting[p.index()] > 0)
    }

    /// Whether a thread already counted in `waiting` at `priority` may take
    /// the gate now.
    fn admits(&self, priority: Priority) -> bool {
        self.open
            && self.holder.is_none()
            && self.highest_waiting().is_none_or(|top| top <= priority)
    }
}

#[derive(Debug, Default)]
pub struct PriorityGate {
    state: Mutex<GateState>,
    changed: Condvar,
}

/// Held for the duration of one ACTIVE phase.  Dropping it admits the next
/// waiter.
#[must_use = "the gate is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct GateGuard<'a> {
    gate: &'a PriorityGate,
}

impl PriorityGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let threads through.  Idempotent.
    pub fn open(&self) {
        self.state.lock().open = true;
        self.changed.notify_all();
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().open
    }

    /// Park until [`open`](Self::open) has been called.
    pub fn await_open(&self) {
        let mut state = self.state.lock();
        while !state.open {
            self.changed.wait(&mut state);
        }
    }

    /// Block until this thread may run at `priority`.
    pub fn enter(&self, priority: Priority) -> GateGuard<'_> {
        let mut state = self.state.lock();
        state.waiting[priority.index()] += 1;
        while !state.admits(priority) {
            self.changed.wait(&mut state);
        }
        state.waiting[priority.index()] -= 1;
        state.holder = Some(priority);
        GateGuard { gate: self }
    }

    /// Number of threads queued at exactly `priority`.
    pub fn waiting_at(&self, priority: Priority) -> usize {
        self.state.lock().waiting[priority.index()]
    }

    /// Poll until `pred` holds on the per-priority queue counts or `limit`
    /// elapses.  Returns whether the predicate was met.
    pub fn wait_for_queue(&self, limit: Duration, pred: impl Fn(&PriorityGate) -> bool) -> bool {
        let deadline = Instant::now() + limit;
        while Instant::now() < deadline {
            if pred(self) {
                return true;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        pred(self)
    }

    fn release(&self) {
        self.state.lock().holder = None;
        self.changed.notify_all();
    }
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.gate.release();
    }
}
