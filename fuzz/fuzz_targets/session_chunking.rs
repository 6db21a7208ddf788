#![no_main]

use libfuzzer_sys::fuzz_target;
use meridian_decoder::{BatchSink, DecodeConfig, PolylineDecoder, StreamingDecodeSession};
use meridian_types::{DecodeBatch, Feature};

struct Records(Vec<Feature>);

impl BatchSink<Feature> for Records {
    fn on_batch(&mut self, batch: DecodeBatch<Feature>) {
        self.0.extend(batch.records);
    }

    fn on_complete(&mut self) {}
}

fn decode(text: &str, split: usize) -> Vec<Feature> {
    let config = DecodeConfig {
        flush_threshold: 3,
        ..DecodeConfig::default()
    };
    let session = StreamingDecodeSession::new(PolylineDecoder::default(), config);
    let mut sink = Records(Vec::new());
    let (head, tail) = text.split_at(split);
    session.feed_chunk(head, &mut sink).unwrap();
    session.feed_chunk(tail, &mut sink).unwrap();
    session.finish(&mut sink).unwrap();
    sink.0
}

// Fuzz target: a two-chunk feed must decode the same as a single feed.
//
// Catches bugs in:
// - Lines split across chunk boundaries
// - CR/LF pairs split across chunks
// - Threshold flushes mid-chunk
fuzz_target!(|input: (&str, usize)| {
    let (text, split) = input;
    let mut split = split % (text.len() + 1);
    while !text.is_char_boundary(split) {
        split -= 1;
    }
    assert_eq!(decode(text, split), decode(text, text.len()));
});
