use meridian_types::{Coordinate, Ring};
use meridian_wire::scale::DEFAULT_PRECISION;
use meridian_wire::varbase::encode_group;
use meridian_wire::{Alphabet, POLYLINE_GROUP_SIZE, RING_DELIMITER};

use crate::error::EncodeError;
use crate::ring::{encode_raw_ring, encode_ring, quantize_ring};

/// Line-oriented source encoder: builds the newline-separated text that
/// the polyline and grid decoders consume.
///
/// It follows the builder pattern: each `add_*` call appends one record
/// and returns `&mut Self` for chaining; [`encode`](Self::encode) returns
/// the accumulated text.
///
/// # Record layouts
///
/// ```text
///   feature line:  <digit><ring 0>\x01<ring 1>\x01 … \n
///   grid line:     <lon0><lat0><lon1><lat1> … \n        (plain 4-byte groups)
/// ```
///
/// # Usage
///
/// ```rust
/// use meridian_encoder::LineEncoder;
/// use meridian_types::{Coordinate, Ring};
///
/// let ring = Ring::new(vec![Coordinate::new(139.74, 35.68), Coordinate::new(139.75, 35.69)]);
/// let text = LineEncoder::new()
///     .add_feature(2, &[ring])
///     .unwrap()
///     .encode();
/// assert!(text.starts_with('2'));
/// ```
pub struct LineEncoder {
    precision: u32,
    out: String,
    records: usize,
}

impl LineEncoder {
    /// Create an encoder at the default precision (5 decimal digits).
    #[must_use]
    pub fn new() -> Self {
        Self::with_precision(DEFAULT_PRECISION)
    }

    #[must_use]
    pub fn with_precision(precision: u32) -> Self {
        Self {
            precision,
            out: String::new(),
            records: 0,
        }
    }

    /// Append a polygon record.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::InvalidClassification`] if `classification > 9`.
    /// - [`EncodeError::EmptyRecord`] if `rings` is empty.
    /// - Any ring encoding error. The encoder is left unchanged on error.
    pub fn add_feature(&mut self, classification: u8, rings: &[Ring]) -> Result<&mut Self, EncodeError> {
        let mut line = record_prefix(classification, rings.len())?;
        for (i, ring) in rings.iter().enumerate() {
            if i > 0 {
                line.push(char::from(RING_DELIMITER));
            }
            encode_ring(ring, self.precision, &mut line)?;
        }
        Ok(self.push_line(&line))
    }

    /// Append a polygon record from already-quantized ring streams.
    ///
    /// # Errors
    ///
    /// Same as [`add_feature`](Self::add_feature).
    pub fn add_raw_feature(&mut self, classification: u8, rings: &[Vec<i64>]) -> Result<&mut Self, EncodeError> {
        let mut line = record_prefix(classification, rings.len())?;
        for (i, ring) in rings.iter().enumerate() {
            if i > 0 {
                line.push(char::from(RING_DELIMITER));
            }
            encode_raw_ring(ring, &mut line)?;
        }
        Ok(self.push_line(&line))
    }

    /// Append a grid line holding plain (non-delta) positions.
    ///
    /// # Errors
    ///
    /// [`EncodeError::OutOfDomain`] or [`EncodeError::Codec`] when a
    /// position does not fit in a four-digit group.
    pub fn add_points(&mut self, points: &[Coordinate]) -> Result<&mut Self, EncodeError> {
        let mut line = String::new();
        for raw in quantize_ring(points, self.precision)? {
            // quantize never yields negatives
            let group = u64::try_from(raw).unwrap_or_default();
            encode_group(group, Alphabet::POLYLINE, POLYLINE_GROUP_SIZE, &mut line)?;
        }
        Ok(self.push_line(&line))
    }

    /// Number of lines added so far.
    #[must_use]
    pub fn records(&self) -> usize {
        self.records
    }

    /// The encoded text, one record per line.
    #[must_use]
    pub fn encode(&self) -> String {
        self.out.clone()
    }

    fn push_line(&mut self, line: &str) -> &mut Self {
        self.out.push_str(line);
        self.out.push('\n');
        self.records += 1;
        self
    }
}

fn record_prefix(classification: u8, ring_count: usize) -> Result<String, EncodeError> {
    if classification > 9 {
        return Err(EncodeError::InvalidClassification(classification));
    }
    if ring_count == 0 {
        return Err(EncodeError::EmptyRecord);
    }
    Ok(char::from(b'0' + classification).to_string())
}

impl Default for LineEncoder {
    fn default() -> Self {
        Self::new()
    }
}
