#![no_main]

use libfuzzer_sys::fuzz_target;
use meridian_wire::varbase::{decode_var_int, decode_var_int_array};
use meridian_wire::{Alphabet, POLYLINE_GROUP_SIZE};

// Fuzz target: fixed-width and variable-length digit decoding.
//
// Catches bugs in:
// - Bytes below the alphabet window (negative digits)
// - Partial trailing groups
// - Accumulator overflow on long tokens
fuzz_target!(|data: &[u8]| {
    let _ = decode_var_int_array(data, Alphabet::POLYLINE, POLYLINE_GROUP_SIZE);
    let _ = decode_var_int(data, Alphabet::FLOW_INDEX, 0);
    let _ = decode_var_int(data, Alphabet::FLOW_VALUE, 0);
});
