//! Helpers shared by the integration suites.

#![allow(dead_code)]

use std::path::Path;

use meridian_decoder::{BatchSink, DecodeConfig, RecordDecoder, StreamingDecodeSession};
use meridian_types::{BatchMeta, DecodeBatch};
use tracing_subscriber::EnvFilter;

/// Install a test-friendly subscriber once. Set `RUST_LOG` to see output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Read a fixture from `tests/golden/`.
pub fn golden(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read golden fixture {}: {e}", path.display()))
}

/// Sink that keeps every batch it is given.
pub struct Collector<R> {
    pub batches: Vec<DecodeBatch<R>>,
    pub completions: usize,
}

impl<R> Default for Collector<R> {
    fn default() -> Self {
        Self {
            batches: Vec::new(),
            completions: 0,
        }
    }
}

impl<R> BatchSink<R> for Collector<R> {
    fn on_batch(&mut self, batch: DecodeBatch<R>) {
        self.batches.push(batch);
    }

    fn on_complete(&mut self) {
        self.completions += 1;
    }
}

impl<R: Clone> Collector<R> {
    pub fn records(&self) -> Vec<R> {
        self.batches.iter().flat_map(|b| b.records.iter().cloned()).collect()
    }
}

impl<R> Collector<R> {
    pub fn sizes(&self) -> Vec<usize> {
        self.batches.iter().map(DecodeBatch::len).collect()
    }

    pub fn last_meta(&self) -> BatchMeta {
        self.batches.last().map(|b| b.meta).unwrap_or_default()
    }
}

pub fn config(threshold: usize) -> DecodeConfig {
    DecodeConfig {
        flush_threshold: threshold,
        ..DecodeConfig::default()
    }
}

/// Feed `text` in chunks of `chunk` bytes (the whole text when `None`)
/// and finish.
pub fn decode_chunked<D: RecordDecoder>(
    decoder: D,
    text: &str,
    threshold: usize,
    chunk: Option<usize>,
) -> Collector<D::Record> {
    let session = StreamingDecodeSession::new(decoder, config(threshold));
    let mut sink = Collector::default();
    let step = chunk.unwrap_or(text.len()).max(1);
    let mut start = 0;
    while start < text.len() {
        let mut end = (start + step).min(text.len());
        while !text.is_char_boundary(end) {
            end += 1;
        }
        session.feed_chunk(&text[start..end], &mut sink).unwrap();
        start = end;
    }
    session.finish(&mut sink).unwrap();
    sink
}
