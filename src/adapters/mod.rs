//! Adapters: concrete implementations of the application port traits.

pub mod brake_pedal;
pub mod cabin_probe;
pub mod log_sink;
