//! Fuzz target: event flag operations
//!
//! Drives arbitrary `raise` / `clear` / `wait_any(Poll)` sequences against a
//! single flag, mirroring the expected bits alongside, and verifies:
//! - The reserved top bit is never stored
//! - A wait returns exactly the matched bits and consumes only those
//! - `clear` reports the bits that were set before it ran
//!
//! cargo fuzz run fuzz_signal_flags

#![no_main]

use libfuzzer_sys::fuzz_target;
use vcu::signals::{FLAG_BITS, SignalBus, Timeout};

fuzz_target!(|data: &[u8]| {
    let bus = SignalBus::new(1);
    let Ok(flag) = bus.create("fuzz") else {
        return;
    };
    let mut model = 0u32;

    for chunk in data.chunks_exact(5) {
        let mask = u32::from_le_bytes([chunk[1], chunk[2], chunk[3], chunk[4]]);
        match chunk[0] % 3 {
            0 => {
                model |= mask & FLAG_BITS;
                assert_eq!(flag.raise(mask), model);
            }
            1 => {
                assert_eq!(flag.clear(mask), model);
                model &= !mask;
            }
            _ => {
                if mask & FLAG_BITS == 0 {
                    continue;
                }
                let expected = model & mask;
                match flag.wait_any(mask, Timeout::Poll) {
                    Ok(bits) => assert_eq!(bits, expected),
                    Err(_) => assert_eq!(expected, 0),
                }
                model &= !mask;
            }
        }
        assert_eq!(flag.get(), model);
        assert_eq!(model & !FLAG_BITS, 0);
    }
});
