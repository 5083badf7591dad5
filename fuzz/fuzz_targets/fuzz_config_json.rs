//! Fuzz target: `SystemConfig::from_json`
//!
//! Feeds arbitrary bytes to the config loader and verifies:
//! - No panics on malformed or hostile JSON
//! - Every accepted config passes `validate` and survives a re-serialise
//! - Every accepted config gets through the thread-free part of bring-up
//!   (kernel, signal bus, vehicle) and yields an addressable worker stack
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use libfuzzer_sys::fuzz_target;
use vcu::boot::{BRAKE_FLAG, TOO_HOT_FLAG};
use vcu::config::SystemConfig;
use vcu::kernel::{Kernel, Priority, ThreadSpec};
use vcu::signals::SignalBus;
use vcu::vehicle::VehicleState;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = SystemConfig::from_json(json) {
        assert!(config.validate().is_ok());
        let again = serde_json::to_string(&config).expect("accepted config must serialise");
        assert_eq!(SystemConfig::from_json(&again).ok().as_ref(), Some(&config));

        // Spawning is left out: parked worker threads would pile up across runs.
        let _kernel = Kernel::initialize(&config);
        let bus = SignalBus::new(config.max_flags);
        let _ = bus.create(TOO_HOT_FLAG);
        let _ = bus.create(BRAKE_FLAG);
        let _vehicle = VehicleState::from_config(&config);
        let spec = ThreadSpec::new("brake", Priority::High, config.worker_stack_kb);
        assert!(spec.stack_bytes().is_some());
    }
});
