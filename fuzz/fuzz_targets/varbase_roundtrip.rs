#![no_main]

use libfuzzer_sys::fuzz_target;
use meridian_wire::varbase::{decode_var_int, encode_var_int};
use meridian_wire::Alphabet;

// Fuzz target: encode_var_int -> decode_var_int for every alphabet.
fuzz_target!(|value: u64| {
    for alphabet in [Alphabet::POLYLINE, Alphabet::FLOW_INDEX, Alphabet::FLOW_VALUE] {
        let mut out = String::new();
        encode_var_int(value, alphabet, &mut out);
        assert_eq!(decode_var_int(out.as_bytes(), alphabet, 0).unwrap(), value);
    }
});
