//! Vehicle control unit library.
//!
//! Four workers (radio, temperature sensor, air conditioner, brake) share
//! one vehicle state and signal each other through named event flags.  A
//! host kernel substrate orders their actions by priority so the whole
//! system runs and is tested on a workstation.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod boot;
pub mod config;
pub mod drivers;
pub mod error;
pub mod kernel;
pub mod signals;
pub mod vehicle;
