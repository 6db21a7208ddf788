#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: one polyline record line.
//
// Catches bugs in:
// - Missing or non-digit classification
// - Empty rings between consecutive delimiters
// - Delta accumulation overflow
fuzz_target!(|data: &str| {
    let _ = meridian_decoder::polyline::decode_record(data, 5);
    let _ = meridian_decoder::polyline::decode_grid_line(data, 5);
});
