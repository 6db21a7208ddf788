//! Conformance tests: golden sources decoded and summarized into inline
//! insta snapshots.
//!
//! The fixtures in `tests/golden/` are written by the generator binary
//! (`src/bin/generate_golden.rs`) and committed. Each test decodes one of
//! them through a [`StreamingDecodeSession`] and snapshots a compact,
//! deterministic rendering of the result: totals, batch sizes and the JSON
//! of a representative record. A diff signals either a deliberate format
//! change (accept via `cargo insta review`) or a regression.

mod common;

use common::{Collector, decode_chunked, golden, init_tracing};
use insta::assert_snapshot;
use meridian_decoder::{
    FlowDocumentDecoder, GridPointDecoder, PolylineDecoder, SessionMessage, TopologyConfig,
};
use meridian_types::{BatchMeta, GridPoint};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn summary<R>(sink: &Collector<R>) -> String {
    let meta = sink.last_meta();
    format!(
        "records={} vertices={} batches={:?} completions={}",
        meta.count,
        meta.vertex_count,
        sink.sizes(),
        sink.completions
    )
}

// ── Polyline regions ──────────────────────────────────────────────────────────

#[test]
fn regions_summary() {
    init_tracing();
    let sink = decode_chunked(PolylineDecoder::default(), &golden("regions.txt"), 10, None);
    assert_snapshot!(summary(&sink), @"records=24 vertices=203 batches=[10, 10, 4] completions=1");
}

#[test]
fn regions_first_vertex() {
    let sink = decode_chunked(PolylineDecoder::default(), &golden("regions.txt"), 10, None);
    let records = sink.records();
    let first = records[0].geometry.polygons[0].rings[0].coords[0];
    assert_snapshot!(serde_json::to_string(&first).unwrap(), @"[-122.0,40.5]");
    assert_snapshot!(serde_json::to_string(&records[13].properties).unwrap(), @r#"{"value":3}"#);
}

#[test]
fn regions_every_fifth_has_two_polygons() {
    let sink = decode_chunked(PolylineDecoder::default(), &golden("regions.txt"), 10, None);
    let counts: Vec<usize> = sink
        .records()
        .iter()
        .map(|f| f.geometry.polygons.len())
        .collect();
    assert_snapshot!(format!("{counts:?}"), @"[2, 1, 1, 1, 1, 2, 1, 1, 1, 1, 2, 1, 1, 1, 1, 2, 1, 1, 1, 1, 2, 1, 1, 1]");
}

// ── Grid ──────────────────────────────────────────────────────────────────────

#[test]
fn grid_summary() {
    let sink = decode_chunked(GridPointDecoder::default(), &golden("grid.txt"), 6, None);
    assert_snapshot!(summary(&sink), @"records=20 vertices=20 batches=[6, 6, 6, 2] completions=1");
}

#[test]
fn grid_add_message() {
    let sink = decode_chunked(GridPointDecoder::default(), &golden("grid.txt"), 6, None);
    let message = SessionMessage::Add {
        data: sink.records()[..2].to_vec(),
        meta: BatchMeta {
            count: 2,
            vertex_count: 2,
        },
    };
    assert_snapshot!(
        serde_json::to_string(&message).unwrap(),
        @r#"{"action":"add","data":[{"position":[-74.0,40.5]},{"position":[-73.75,40.5]}],"meta":{"count":2,"vertexCount":2}}"#
    );
    assert_snapshot!(
        serde_json::to_string(&SessionMessage::<GridPoint>::End).unwrap(),
        @r#"{"action":"end"}"#
    );
}

// ── Flow topology ─────────────────────────────────────────────────────────────

#[test]
fn flows_summary() {
    let decoder = FlowDocumentDecoder::new(TopologyConfig::default());
    let sink = decode_chunked(decoder, &golden("flows.json"), 6000, Some(64));
    assert_snapshot!(summary(&sink), @"records=4 vertices=8 batches=[4] completions=1");
}

#[test]
fn flows_mirrored_properties() {
    let decoder = FlowDocumentDecoder::new(TopologyConfig::default());
    let sink = decode_chunked(decoder, &golden("flows.json"), 6000, None);
    let records = sink.records();
    assert_snapshot!(
        serde_json::to_string(&records[2].properties).unwrap(),
        @r#"{"name":"R2","flows":[{"target":0,"flow":40}],"netFlow":40,"centroid":[-99.5,31.5],"fips":"06002"}"#
    );
    assert_snapshot!(
        serde_json::to_string(&records[0].properties.flows).unwrap(),
        @r#"[{"target":1,"flow":120},{"target":2,"flow":-40},{"target":3,"flow":-7}]"#
    );
}
