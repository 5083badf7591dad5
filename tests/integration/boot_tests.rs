//! Integration tests: bring-up, start, and failure handling.

use std::sync::Arc;
use std::time::Duration;

use embedded_hal::digital::OutputPin;
use vcu::app::events::VcuEvent;
use vcu::app::ports::EventSink;
use vcu::boot::{self, BRAKE_FLAG, TOO_HOT_FLAG};
use vcu::drivers::indicator::Indicators;
use vcu::error::{BootError, Error};
use vcu::kernel::{KernelState, Priority};

use super::mock_hw::{ManualProbe, RecordingSink, fast_config};

#[test]
fn boot_creates_flags_and_four_workers() {
    let sink = RecordingSink::new();
    let (indicators, _probes) = Indicators::simulated();
    let system = boot::boot(
        &fast_config(),
        indicators,
        |_| ManualProbe::new(20.0),
        sink.clone() as Arc<dyn EventSink>,
    )
    .unwrap();

    assert_eq!(system.kernel.state(), KernelState::Ready);
    assert_eq!(system.bus.len(), 2);
    assert!(system.bus.find(TOO_HOT_FLAG).is_some());
    assert!(system.bus.find(BRAKE_FLAG).is_some());

    let threads: Vec<_> = system
        .kernel
        .threads()
        .into_iter()
        .map(|t| (t.name.to_string(), t.priority))
        .collect();
    assert_eq!(
        threads,
        vec![
            ("radio".to_string(), Priority::Normal),
            ("temperature sensor".to_string(), Priority::Normal),
            ("air conditioner".to_string(), Priority::AboveNormal),
            ("brake".to_string(), Priority::High),
        ]
    );
}

#[test]
fn vehicle_is_assembled_from_config() {
    let mut config = fast_config();
    config.initial_speed_kmh = 42.0;
    let (indicators, _probes) = Indicators::simulated();
    let system = boot::boot(
        &config,
        indicators,
        |_| ManualProbe::new(20.0),
        RecordingSink::new() as Arc<dyn EventSink>,
    )
    .unwrap();

    assert_eq!(system.vehicle.speed(), 42.0);
    assert_eq!(system.vehicle.max_speed(), 200.0);
    assert_eq!(system.vehicle.temperature(), 20.0);
    assert!(!system.vehicle.radio().is_on());
    assert_eq!(system.vehicle.radio().frequency(), 100.0);
}

#[test]
fn indicators_are_reset_at_boot() {
    let (mut indicators, probes) = Indicators::simulated();
    indicators.brake.set_high().unwrap();
    indicators.climate.set_high().unwrap();

    let _system = boot::boot(
        &fast_config(),
        indicators,
        |_| ManualProbe::new(20.0),
        RecordingSink::new() as Arc<dyn EventSink>,
    )
    .unwrap();

    assert!(!probes.brake.is_high());
    assert!(!probes.climate.is_high());
}

#[test]
fn workers_do_not_run_before_start() {
    let sink = RecordingSink::new();
    let (indicators, probes) = Indicators::simulated();
    let system = boot::boot(
        &fast_config(),
        indicators,
        |_| ManualProbe::new(20.0),
        sink.clone() as Arc<dyn EventSink>,
    )
    .unwrap();

    system.press_brake();
    std::thread::sleep(Duration::from_millis(50));
    assert!(!probes.temperature.is_high());
    assert!(!probes.brake.is_high());
    assert_eq!(system.vehicle.speed(), 0.0);

    system.start().unwrap();
    assert_eq!(system.kernel.state(), KernelState::Running);
    assert!(sink.wait_for(1, |e| matches!(e, VcuEvent::Braked { .. })));
    assert!(sink.wait_for(1, |e| *e == VcuEvent::Started { threads: 4 }));
    assert!(probes.brake.is_high());
}

#[test]
fn start_is_refused_once_running() {
    let sink = RecordingSink::new();
    let (indicators, _probes) = Indicators::simulated();
    let system = boot::boot(
        &fast_config(),
        indicators,
        |_| ManualProbe::new(20.0),
        sink.clone() as Arc<dyn EventSink>,
    )
    .unwrap();
    system.start().unwrap();
    assert_eq!(
        system.start(),
        Err(Error::Boot(BootError::KernelNotReady))
    );
    assert_eq!(system.kernel.state(), KernelState::Running);
    assert_eq!(sink.count(|e| matches!(e, VcuEvent::Started { .. })), 1);
}

#[test]
fn thread_exhaustion_aborts_boot_and_nothing_runs() {
    let mut config = fast_config();
    config.max_threads = 3;
    let (indicators, probes) = Indicators::simulated();

    let result = boot::boot(
        &config,
        indicators,
        |_| ManualProbe::new(20.0),
        RecordingSink::new() as Arc<dyn EventSink>,
    );
    assert_eq!(result.err(), Some(Error::Boot(BootError::ThreadsExhausted)));

    std::thread::sleep(Duration::from_millis(50));
    assert!(!probes.radio.is_high());
    assert!(!probes.temperature.is_high());
    assert!(!probes.climate.is_high());
}

#[test]
fn flag_exhaustion_aborts_boot() {
    let mut config = fast_config();
    config.max_flags = 1;
    let (indicators, _probes) = Indicators::simulated();

    let result = boot::boot(
        &config,
        indicators,
        |_| ManualProbe::new(20.0),
        RecordingSink::new() as Arc<dyn EventSink>,
    );
    assert_eq!(result.err(), Some(Error::Boot(BootError::FlagsExhausted)));
}

#[test]
fn invalid_config_aborts_boot() {
    let mut config = fast_config();
    config.worker_stack_kb = 0;
    let (indicators, _probes) = Indicators::simulated();

    let result = boot::boot(
        &config,
        indicators,
        |_| ManualProbe::new(20.0),
        RecordingSink::new() as Arc<dyn EventSink>,
    );
    assert!(matches!(result.err(), Some(Error::Config(_))));
}

#[test]
fn oversized_stack_is_rejected_before_any_thread_exists() {
    let mut config = fast_config();
    config.worker_stack_kb = usize::MAX;
    let (indicators, _probes) = Indicators::simulated();

    let result = boot::boot(
        &config,
        indicators,
        |_| ManualProbe::new(20.0),
        RecordingSink::new() as Arc<dyn EventSink>,
    );
    assert_eq!(
        result.err(),
        Some(Error::Config("worker_stack_kb exceeds stack limit"))
    );
}
