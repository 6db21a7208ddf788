#![no_main]

use libfuzzer_sys::fuzz_target;
use meridian_decoder::{decode_topology, link_features, TopologyConfig};

// Fuzz target: topology documents, then flow linking.
//
// Catches bugs in:
// - Arc indices out of range (positive and complemented)
// - Missing or degenerate transforms
// - Flow targets beyond the collection
fuzz_target!(|data: &str| {
    if let Ok(mut features) = decode_topology(data, &TopologyConfig::default()) {
        link_features(&mut features);
    }
});
