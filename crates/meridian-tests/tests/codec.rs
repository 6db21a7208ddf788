//! Codec properties over pseudo-random inputs.
//!
//! Inputs come from a fixed-seed LCG so failures are reproducible without
//! pulling in a property-testing framework.

use meridian_decoder::decode_flows;
use meridian_decoder::polyline::{decode_raw, decode_record};
use meridian_encoder::{LineEncoder, encode_flows};
use meridian_types::{Coordinate, FlowLinks, Ring};
use pretty_assertions::assert_eq;

struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    /// Uniform in `[-span, span]`.
    fn signed(&mut self, span: i64) -> i64 {
        (self.next() % (2 * span as u64 + 1)) as i64 - span
    }
}

// ── Polyline ──────────────────────────────────────────────────────────────────

#[test]
fn raw_walks_decode_exactly() {
    let mut rng = Lcg(7);
    for _ in 0..50 {
        let mut values = vec![rng.next() as i64 % 36_000_000, rng.next() as i64 % 18_000_000];
        let steps = rng.next() % 40;
        for _ in 0..steps {
            let n = values.len();
            values.push((values[n - 2] + rng.signed(1_000_000)).max(0));
            values.push((values[n - 1] + rng.signed(1_000_000)).max(0));
        }

        let text = LineEncoder::new().add_raw_feature(0, &[values.clone()]).unwrap().encode();
        let line = text.strip_suffix('\n').unwrap();
        assert_eq!(decode_raw(&line.as_bytes()[1..]).unwrap(), values);
    }
}

#[test]
fn coordinate_walks_stay_within_half_a_unit() {
    let mut rng = Lcg(42);
    let tolerance = 0.5e-5 + 1e-9;
    for _ in 0..50 {
        let mut coords = vec![Coordinate::new(-170.0 + (rng.next() % 340) as f64, -80.0 + (rng.next() % 160) as f64)];
        for _ in 0..rng.next() % 30 {
            let last = coords[coords.len() - 1];
            coords.push(Coordinate::new(
                last.lon + rng.signed(1000) as f64 * 1e-5 + 0.123_456_7e-5,
                last.lat + rng.signed(1000) as f64 * 1e-5 - 0.333e-5,
            ));
        }

        let classification = (rng.next() % 10) as u8;
        let text = LineEncoder::new()
            .add_feature(classification, &[Ring::new(coords.clone())])
            .unwrap()
            .encode();
        let feature = decode_record(text.strip_suffix('\n').unwrap(), 5).unwrap();

        assert_eq!(feature.properties.classification, Some(classification));
        let decoded = &feature.geometry.polygons[0].rings[0].coords;
        assert_eq!(decoded.len(), coords.len());
        for (d, c) in decoded.iter().zip(&coords) {
            assert!((d.lon - c.lon).abs() <= tolerance, "{d:?} vs {c:?}");
            assert!((d.lat - c.lat).abs() <= tolerance, "{d:?} vs {c:?}");
        }
    }
}

// ── Flows ─────────────────────────────────────────────────────────────────────

#[test]
fn flow_rows_decode_exactly() {
    let mut rng = Lcg(3);
    for _ in 0..100 {
        let len = rng.next() % 12;
        let row: FlowLinks = (0..len)
            .map(|i| (i as usize * 97 + (rng.next() % 97) as usize, rng.signed(2_000_000)))
            .collect();
        assert_eq!(decode_flows(&encode_flows(&row)).unwrap(), row);
    }
}

#[test]
fn flow_rows_at_integer_bounds() {
    let row: FlowLinks = [
        (0, i64::MAX),
        (1, i64::MIN + 1),
        (usize::MAX, -1),
        (2, 0),
    ]
    .into_iter()
    .collect();
    assert_eq!(decode_flows(&encode_flows(&row)).unwrap(), row);

    // i64::MIN cannot be mirrored, so the row is refused
    let row: FlowLinks = [(3, i64::MIN)].into_iter().collect();
    assert!(decode_flows(&encode_flows(&row)).is_err());
}
