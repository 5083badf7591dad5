//! Integration tests: event-flag wake-ups and priority ordering across the
//! running worker threads.

use std::sync::Arc;
use std::time::Duration;

use vcu::adapters::brake_pedal;
use vcu::adapters::cabin_probe::CabinProbe;
use vcu::app::events::VcuEvent;
use vcu::app::ports::EventSink;
use vcu::app::workers::TOO_HOT;
use vcu::boot::{self, SystemContext};
use vcu::drivers::indicator::{IndicatorProbes, Indicators};
use vcu::kernel::Priority;

use super::mock_hw::{ManualProbe, RecordingSink, fast_config};

fn started(probe: ManualProbe) -> (SystemContext, Arc<RecordingSink>, IndicatorProbes) {
    let sink = RecordingSink::new();
    let (indicators, pins) = Indicators::simulated();
    let system = boot::boot(
        &fast_config(),
        indicators,
        move |_| probe,
        sink.clone() as Arc<dyn EventSink>,
    )
    .unwrap();
    system.start().unwrap();
    (system, sink, pins)
}

fn is_braked(e: &VcuEvent) -> bool {
    matches!(e, VcuEvent::Braked { .. })
}

fn is_cooled(e: &VcuEvent) -> bool {
    matches!(e, VcuEvent::Cooled { .. })
}

#[test]
fn brake_press_decelerates() {
    let (system, sink, pins) = started(ManualProbe::new(20.0));
    system.vehicle.set_speed(100.0);

    system.press_brake();
    assert!(sink.wait_for(1, is_braked));
    assert_eq!(system.vehicle.speed(), 95.0);
    assert!(pins.brake.is_high());
}

#[test]
fn single_too_hot_raise_cools_exactly_once() {
    let (system, sink, pins) = started(ManualProbe::new(20.0));

    system.too_hot.raise(TOO_HOT);
    assert!(sink.wait_for(1, is_cooled));
    std::thread::sleep(Duration::from_millis(100));

    assert_eq!(sink.count(is_cooled), 1);
    assert_eq!(system.vehicle.temperature(), 19.0);
    assert!(pins.climate.is_high());
}

#[test]
fn brake_press_leaves_climate_blocked() {
    let (system, sink, pins) = started(ManualProbe::new(20.0));

    system.press_brake();
    assert!(sink.wait_for(1, is_braked));
    std::thread::sleep(Duration::from_millis(50));

    assert_eq!(sink.count(is_cooled), 0);
    assert!(pins.brake.is_high());
    assert!(!pins.climate.is_high());
    assert_eq!(system.vehicle.temperature(), 20.0);
}

#[test]
fn brake_runs_before_climate_when_both_are_runnable() {
    let (system, sink, _pins) = started(ManualProbe::new(20.0));
    let gate = Arc::clone(system.kernel.gate());

    // Hold the gate so both workers queue up before either may act.
    let held = gate.enter(Priority::Realtime);
    system.too_hot.raise(TOO_HOT);
    system.press_brake();
    assert!(gate.wait_for_queue(Duration::from_secs(5), |g| {
        g.waiting_at(Priority::High) == 1 && g.waiting_at(Priority::AboveNormal) == 1
    }));
    drop(held);

    assert!(sink.wait_for(1, is_cooled));
    let order: Vec<_> = sink
        .events()
        .into_iter()
        .filter(|e| is_braked(e) || is_cooled(e))
        .collect();
    assert!(is_braked(&order[0]), "brake must act first: {order:?}");
    assert!(is_cooled(&order[1]), "climate must act second: {order:?}");
}

#[test]
fn climate_runs_before_background_workers() {
    let probe = ManualProbe::new(40.0);
    let (system, sink, _pins) = started(probe.clone());
    assert!(sink.wait_for(1, |e| matches!(e, VcuEvent::TooHot { .. })));
    let gate = Arc::clone(system.kernel.gate());

    // With the gate held, the temperature worker queues behind it and will
    // report the cabin back to normal on its next sample.
    let held = gate.enter(Priority::Realtime);
    probe.set(20.0);
    system.too_hot.raise(TOO_HOT);
    assert!(gate.wait_for_queue(Duration::from_secs(5), |g| {
        g.waiting_at(Priority::AboveNormal) == 1 && g.waiting_at(Priority::Normal) == 2
    }));
    let mark = sink.events().len();
    drop(held);

    assert!(sink.wait_for(1, |e| matches!(e, VcuEvent::TemperatureNormal { .. })));
    let after = sink.events().split_off(mark);
    assert!(is_cooled(&after[0]), "climate must act first: {after:?}");
}

#[test]
fn hot_cabin_is_cooled_back_to_threshold() {
    let sink = RecordingSink::new();
    let (indicators, _pins) = Indicators::simulated();
    let config = fast_config();
    let system = boot::boot(
        &config,
        indicators,
        |vehicle| CabinProbe::new(Arc::clone(vehicle), 0.0),
        sink.clone() as Arc<dyn EventSink>,
    )
    .unwrap();
    system.vehicle.set_temperature(config.too_hot_threshold_c + 3.0);
    system.start().unwrap();

    assert!(sink.wait_for(1, |e| matches!(e, VcuEvent::TooHot { .. })));
    assert!(sink.wait_for(1, |e| matches!(e, VcuEvent::TemperatureNormal { .. })));
    assert!(system.vehicle.temperature() <= config.too_hot_threshold_c);
    assert!(sink.count(is_cooled) >= 3);
}

#[test]
fn probe_reading_above_threshold_drives_cooling() {
    let probe = ManualProbe::new(20.0);
    let (system, sink, _pins) = started(probe.clone());

    std::thread::sleep(Duration::from_millis(30));
    assert_eq!(sink.count(is_cooled), 0);

    probe.set(40.0);
    assert!(sink.wait_for(2, is_cooled));
    probe.set(20.0);
    assert!(sink.wait_for(1, |e| matches!(e, VcuEvent::TemperatureNormal { .. })));
    assert!(system.vehicle.temperature() < 20.0);
}

#[test]
fn brake_pedal_brakes_from_configured_speed() {
    let sink = RecordingSink::new();
    let (indicators, _pins) = Indicators::simulated();
    let mut config = fast_config();
    config.initial_speed_kmh = 60.0;
    config.sim_brake_interval_ms = 5;
    let system = boot::boot(
        &config,
        indicators,
        |_| ManualProbe::new(20.0),
        sink.clone() as Arc<dyn EventSink>,
    )
    .unwrap();
    system.start().unwrap();
    assert_eq!(system.vehicle.speed(), 60.0);

    brake_pedal::spawn(
        system.brake_pressed.clone(),
        Duration::from_millis(config.sim_brake_interval_ms),
    )
    .unwrap();
    assert!(sink.wait_for(1, is_braked));
    let first = sink.events().into_iter().find(is_braked);
    assert_eq!(first, Some(VcuEvent::Braked { speed_kmh: 55.0 }));
}
