//! Named binary event flags.
//!
//! Producers raise bits, consumers block until any bit of interest is set
//! and consume the bits they matched.
//!
//! ```text
//! ┌──────────────────┐  raise(too_hot)   ┌───────────────┐  wait_any   ┌────────────────┐
//! │ TemperatureWorker│──────────────────▶│               │────────────▶│ ClimateWorker  │
//! └──────────────────┘                   │   SignalBus   │             └────────────────┘
//! ┌──────────────────┐  raise(brake)     │  (event flags)│  wait_any   ┌────────────────┐
//! │ brake input      │──────────────────▶│               │────────────▶│ BrakeWorker    │
//! └──────────────────┘                   └───────────────┘             └────────────────┘
//! ```
//!
//! Several waiters may block on the same flag.  Every raise wakes all of
//! them; the first to re-check the bits consumes the match and the others
//! go back to sleep (first-consumer semantics).

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, error};
use parking_lot::{Condvar, Mutex};

use crate::error::{BootError, Result, WaitError};

/// Hard upper bound on the number of flags a bus can hold.
pub const MAX_FLAGS: usize = 8;

/// Bit 31 is reserved and never stored.
pub const FLAG_BITS: u32 = 0x7FFF_FFFF;

/// Bounded flag name.
pub type FlagName = heapless::String<24>;

/// How long [`SignalBus::wait_any`] may block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeout {
    /// Return immediately if no requested bit is set.
    Poll,
    /// Block for at most this long.
    After(Duration),
    /// Block until a requested bit is set.
    Forever,
}

// ── Flag ──────────────────────────────────────────────────────

#[derive(Debug)]
struct EventFlag {
    name: FlagName,
    bits: Mutex<u32>,
    raised: Condvar,
}

/// Cheap, cloneable reference to one event flag.
#[derive(Debug, Clone)]
pub struct FlagHandle(Arc<EventFlag>);

impl FlagHandle {
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Set bits in `mask` and wake every waiter.  Returns the bits now set.
    pub fn raise(&self, mask: u32) -> u32 {
        let mut bits = self.0.bits.lock();
        *bits |= mask & FLAG_BITS;
        let now = *bits;
        drop(bits);
        self.0.raised.notify_all();
        debug!("flag '{}' raised 0x{:x} -> 0x{:x}", self.0.name, mask, now);
        now
    }

    /// Clear bits in `mask`.  Returns the bits that were set before.
    pub fn clear(&self, mask: u32) -> u32 {
        let mut bits = self.0.bits.lock();
        let before = *bits;
        *bits &= !mask;
        before
    }

    /// Current bits, without consuming anything.
    pub fn get(&self) -> u32 {
        *self.0.bits.lock()
    }

    /// Block until any bit in `mask` is set, then clear and return the
    /// matched bits.
    ///
    /// A mask with no usable bits can never be satisfied and times out at
    /// once, whatever `timeout` says.
    pub fn wait_any(&self, mask: u32, timeout: Timeout) -> core::result::Result<u32, WaitError> {
        if mask & FLAG_BITS == 0 {
            debug!("flag '{}' waited with empty mask 0x{:x}", self.0.name, mask);
            return Err(WaitError::Timeout);
        }
        // A deadline beyond what `Instant` can represent waits forever.
        let deadline = match timeout {
            Timeout::After(d) => Instant::now().checked_add(d),
            Timeout::Poll | Timeout::Forever => None,
        };

        let mut bits = self.0.bits.lock();
        loop {
            let matched = *bits & mask;
            if matched != 0 {
                *bits &= !matched;
                return Ok(matched);
            }
            match (timeout, deadline) {
                (Timeout::Poll, _) => return Err(WaitError::Timeout),
                (_, Some(deadline)) => {
                    if self.0.raised.wait_until(&mut bits, deadline).timed_out() {
                        // A raise may have landed exactly at the deadline.
                        let matched = *bits & mask;
                        if matched != 0 {
                            *bits &= !matched;
                            return Ok(matched);
                        }
                        return Err(WaitError::Timeout);
                    }
                }
                _ => self.0.raised.wait(&mut bits),
            }
        }
    }
}

// ── Bus ───────────────────────────────────────────────────────

/// Registry of the flags allocated at boot.
#[derive(Debug)]
pub struct SignalBus {
    flags: Mutex<heapless::Vec<FlagHandle, MAX_FLAGS>>,
    limit: usize,
}

impl SignalBus {
    /// A bus that can hold up to `limit` flags (capped at [`MAX_FLAGS`]).
    pub fn new(limit: usize) -> Self {
        Self {
            flags: Mutex::new(heapless::Vec::new()),
            limit: limit.min(MAX_FLAGS),
        }
    }

    /// Allocate a named flag with no bits set.  Fails when the bus is full.
    /// Names longer than [`FlagName`] capacity are truncated.
    pub fn create(&self, name: &str) -> Result<FlagHandle> {
        let mut flags = self.flags.lock();
        if flags.len() >= self.limit {
            error!("signal bus full, cannot create flag '{}'", name);
            return Err(BootError::FlagsExhausted.into());
        }
        let handle = FlagHandle(Arc::new(EventFlag {
            name: bounded_name(name),
            bits: Mutex::new(0),
            raised: Condvar::new(),
        }));
        flags
            .push(handle.clone())
            .map_err(|_| BootError::FlagsExhausted)?;
        debug!("flag '{}' created ({}/{})", handle.name(), flags.len(), self.limit);
        Ok(handle)
    }

    pub fn raise(&self, handle: &FlagHandle, mask: u32) -> u32 {
        handle.raise(mask)
    }

    pub fn wait_any(
        &self,
        handle: &FlagHandle,
        mask: u32,
        timeout: Timeout,
    ) -> core::result::Result<u32, WaitError> {
        handle.wait_any(mask, timeout)
    }

    pub fn clear(&self, handle: &FlagHandle, mask: u32) -> u32 {
        handle.clear(mask)
    }

    pub fn get(&self, handle: &FlagHandle) -> u32 {
        handle.get()
    }

    /// Look a flag up by name.
    pub fn find(&self, name: &str) -> Option<FlagHandle> {
        self.flags.lock().iter().find(|h| h.name() == name).cloned()
    }

    pub fn len(&self) -> usize {
        self.flags.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Copy as much of `name` as fits, on a char boundary.
pub(crate) fn bounded_name<const N: usize>(name: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in name.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
