//! Port traits: the boundary between the workers and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Worker (domain)
//! ```
//!
//! Indicator lines are not listed here: they use the `embedded-hal`
//! digital traits directly.

use super::events::VcuEvent;

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// Shared by every worker thread, hence `&self` and `Send + Sync`.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &VcuEvent);
}

// ───────────────────────────────────────────────────────────────
// Temperature port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Owned by the temperature worker.
pub trait TemperatureProbe: Send {
    /// Current cabin temperature in °C.
    fn sample(&mut self) -> f64;
}
