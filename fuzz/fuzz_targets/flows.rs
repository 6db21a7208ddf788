#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: flow string scanning.
//
// Catches bugs in:
// - Value tokens with no preceding index
// - Trailing index tokens
// - Bytes outside both alphabets
fuzz_target!(|data: &str| {
    let _ = meridian_decoder::decode_flows(data);
});
