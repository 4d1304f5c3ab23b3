//! Fuzz target for event decoding and the status reducer.
//!
//! Run with: cargo +nightly fuzz run fuzz_event_reducer
//!
//! Treats the input as an NDJSON event stream; every decodable prefix is
//! folded through the reducer, which must never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use svcstate_core::{Event, ServiceDirectory, StatusReducer};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let reducer = StatusReducer::new("wss://127.0.0.1:55400", ServiceDirectory::default());
    let mut status = reducer.initial().clone();
    for line in s.lines() {
        if let Ok(event) = Event::from_json(line) {
            let next = reducer.apply(&status, &event);
            if matches!(event, Event::TransportDisconnected) {
                assert_eq!(&next, reducer.initial());
            }
            status = next;
        }
    }
});
