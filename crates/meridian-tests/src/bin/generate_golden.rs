//! Golden fixture generator for the meridian conformance suite.
//!
//! This binary writes every fixture under `tests/golden/`. Run it after a
//! wire-format change to regenerate the committed sources; inline
//! snapshots in `tests/conformance.rs` are then reviewed with
//! `cargo insta review`.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --bin generate_golden -p meridian-tests
//! ```
//!
//! # Generated fixtures
//!
//! | File          | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | regions.txt   | 24 hexagonal polyline records, every fifth with a 2nd ring |
//! | grid.txt      | 4 grid lines of 5 positions on a quarter-degree lattice   |
//! | flows.json    | 2×2 topology of unit squares with flow strings           |

#![allow(clippy::pedantic)]

use std::path::Path;

use meridian_encoder::{LineEncoder, encode_flows};
use meridian_types::{Coordinate, FlowLinks};
use serde_json::{Value, json};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Closed hexagon around the origin, in coordinate integers at precision 5.
const HEXAGON: [(i64, i64); 7] = [
    (50_000, 0),
    (25_000, 43_300),
    (-25_000, 43_300),
    (-50_000, 0),
    (-25_000, -43_300),
    (25_000, -43_300),
    (50_000, 0),
];

fn hexagon(center: (i64, i64), shrink: i64) -> Vec<i64> {
    HEXAGON
        .iter()
        .flat_map(|&(dx, dy)| [center.0 + dx / shrink, center.1 + dy / shrink])
        .collect()
}

fn regions() -> String {
    let mut encoder = LineEncoder::new();
    for i in 0..24i64 {
        // lon -122.5, lat 40.5 at the first center
        let center = (5_750_000 + 100_000 * (i % 6), 22_050_000 + 86_600 * (i / 6));
        let mut rings = vec![hexagon(center, 1)];
        if i % 5 == 0 {
            rings.push(hexagon(center, 4));
        }
        encoder
            .add_raw_feature((i % 10) as u8, &rings)
            .expect("fixture rings fit the codec");
    }
    encoder.encode()
}

fn grid() -> String {
    let mut encoder = LineEncoder::new();
    for row in 0..4 {
        let points: Vec<Coordinate> = (0..5)
            .map(|col| Coordinate::new(-74.0 + 0.25 * f64::from(col), 40.5 + 0.25 * f64::from(row)))
            .collect();
        encoder
            .add_points(&points)
            .expect("fixture points fit the codec");
    }
    encoder.encode()
}

fn flows() -> String {
    let rows: [&[(usize, i64)]; 4] = [&[(1, 120), (2, -40)], &[(3, 15)], &[], &[(0, 7)]];

    let geometries: Vec<Value> = rows
        .iter()
        .enumerate()
        .map(|(k, row)| {
            let mut properties = json!({ "name": format!("R{k}"), "fips": format!("0600{k}") });
            if !row.is_empty() {
                let links: FlowLinks = row.iter().copied().collect();
                properties["flows"] = json!(encode_flows(&links));
            }
            json!({ "type": "Polygon", "arcs": [[k]], "properties": properties })
        })
        .collect();

    // one closed square arc per region, delta-coded
    let arcs: Vec<Value> = (0..4usize)
        .map(|k| {
            let (x, y) = (2 * (k % 2), 2 * (k / 2));
            json!([[x, y], [2, 0], [0, 2], [-2, 0], [0, -2]])
        })
        .collect();

    let topology = json!({
        "type": "Topology",
        "transform": { "scale": [0.5, 0.5], "translate": [-100.0, 30.0] },
        "arcs": arcs,
        "objects": {
            "regions": { "type": "GeometryCollection", "geometries": geometries }
        }
    });
    serde_json::to_string_pretty(&topology).expect("json values always serialize")
}

fn write(dir: &Path, name: &str, contents: &str) {
    let path = dir.join(name);
    std::fs::write(&path, contents)
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
    info!(path = %path.display(), bytes = contents.len(), "wrote fixture");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/golden");
    std::fs::create_dir_all(&dir)
        .unwrap_or_else(|e| panic!("failed to create {}: {e}", dir.display()));

    write(&dir, "regions.txt", &regions());
    write(&dir, "grid.txt", &grid());
    write(&dir, "flows.json", &flows());
}
