//! Unified error types for the vehicle control unit.
//!
//! Only two things can go wrong in this system: bringing it up (resource
//! exhaustion, a kernel that is not ready, bad configuration) and waiting on
//! an event flag with a finite timeout.  Domain mutators are total and never
//! produce errors.  All variants are `Copy` so they can be passed around and
//! logged without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation outside of `wait_any` funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Bring-up failed.  Never retried: the system halts instead of running
    /// with a partial worker set.
    Boot(BootError),
    /// Configuration is invalid or could not be parsed.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boot(e) => write!(f, "boot: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Boot errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootError {
    /// The signal bus has no free event-flag slot.
    FlagsExhausted,
    /// The kernel thread table is full.
    ThreadsExhausted,
    /// The host refused to create an OS thread.
    ThreadSpawnFailed,
    /// `start` was called while the kernel was not in the `Ready` state.
    KernelNotReady,
}

impl fmt::Display for BootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FlagsExhausted => write!(f, "no event flag available"),
            Self::ThreadsExhausted => write!(f, "thread table full"),
            Self::ThreadSpawnFailed => write!(f, "thread creation failed"),
            Self::KernelNotReady => write!(f, "kernel not ready"),
        }
    }
}

impl From<BootError> for Error {
    fn from(e: BootError) -> Self {
        Self::Boot(e)
    }
}

// ---------------------------------------------------------------------------
// Wait errors
// ---------------------------------------------------------------------------

/// Returned by [`SignalBus::wait_any`](crate::signals::SignalBus::wait_any)
/// when no requested bit became set in time.  Kept apart from [`Error`] so a
/// timed-out wait can never be confused with a successful wake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitError {
    Timeout,
}

impl fmt::Display for WaitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "wait timed out"),
        }
    }
}

impl std::error::Error for WaitError {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
