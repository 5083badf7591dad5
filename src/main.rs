//! VCU host simulator: main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │   SimPin indicators   CabinProbe   LogEventSink   brake pedal│
//! │  ─────────────── Port / embedded-hal boundary ────────────── │
//! │   radio · temperature sensor · air conditioner · brake       │
//! │  ─────────────────── Kernel (priority gate) ──────────────── │
//! │   SignalBus (too hot, brake)        VehicleState (atomics)   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `vcu [config.json]`.  Log level via `RUST_LOG` (default `info`).

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{error, info};

use vcu::adapters::brake_pedal;
use vcu::adapters::cabin_probe::CabinProbe;
use vcu::adapters::log_sink::LogEventSink;
use vcu::app::events::VcuEvent;
use vcu::app::ports::EventSink;
use vcu::boot;
use vcu::config::SystemConfig;
use vcu::drivers::indicator::Indicators;

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("╔══════════════════════════════════════╗");
    info!("║  VCU v{}                          ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Config (file or defaults) ──────────────────────────
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            let config = SystemConfig::from_json(&json)
                .with_context(|| format!("loading config {path}"))?;
            info!("Config loaded from {}", path);
            config
        }
        None => {
            info!("No config file given, using defaults");
            SystemConfig::default()
        }
    };

    // ── 3. Boot ───────────────────────────────────────────────
    let (indicators, _probes) = Indicators::simulated();
    let sink: Arc<dyn EventSink> = Arc::new(LogEventSink::new());
    let solar_load_c = config.sim_solar_load_c;

    let system = match boot::boot(
        &config,
        indicators,
        |vehicle| CabinProbe::new(Arc::clone(vehicle), solar_load_c),
        Arc::clone(&sink),
    ) {
        Ok(system) => system,
        Err(e) => {
            error!("Boot failed: {} -- halting", e);
            halt();
        }
    };

    if let Err(e) = system.start() {
        error!("Kernel start failed: {} -- halting", e);
        halt();
    }

    // ── 4. External brake input ───────────────────────────────
    if config.sim_brake_interval_ms > 0 {
        info!(
            "Brake pedal pressed every {}ms from {:.1} km/h",
            config.sim_brake_interval_ms,
            system.vehicle.speed()
        );
        brake_pedal::spawn(
            system.brake_pressed.clone(),
            Duration::from_millis(config.sim_brake_interval_ms),
        )
        .context("starting brake pedal")?;
    }

    // ── 5. Idle: periodic telemetry ───────────────────────────
    let telemetry = Duration::from_millis(config.telemetry_interval_ms);
    loop {
        std::thread::sleep(telemetry);
        sink.emit(&VcuEvent::Telemetry(system.vehicle.snapshot()));
    }
}

/// Safe idle state after a fatal bring-up error.  Never returns.
fn halt() -> ! {
    loop {
        std::thread::park();
    }
}
