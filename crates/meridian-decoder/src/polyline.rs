use meridian_types::{Coordinate, Feature, GridPoint, MultiPolygon, Polygon, Properties, Ring};
use meridian_wire::scale::to_degrees;
use meridian_wire::varbase::decode_var_int_array;
use meridian_wire::zigzag::zigzag_decode;
use meridian_wire::{Alphabet, CodecError, POLYLINE_GROUP_SIZE, RING_DELIMITER};

use crate::config::DecodeConfig;
use crate::error::DecodeError;
use crate::session::{Framing, RecordDecoder};

/// Decode one ring stream into its interleaved raw integers.
///
/// The first two groups are the absolute longitude and latitude. Every
/// later group is a zigzag delta from the previous value of the same axis:
///
/// ```text
///   groups:  g0   g1   g2         g3         g4         …
///   values:  g0   g1   g0+zz(g2)  g1+zz(g3)  v2+zz(g4)  …
/// ```
///
/// # Errors
///
/// [`DecodeError::Codec`] for a partial group, a byte outside the polyline
/// alphabet, or an accumulated value that overflows `i64`.
pub fn decode_raw(text: &[u8]) -> Result<Vec<i64>, DecodeError> {
    let groups = decode_var_int_array(text, Alphabet::POLYLINE, POLYLINE_GROUP_SIZE)?;
    let mut values: Vec<i64> = Vec::with_capacity(groups.len());
    for (i, group) in groups.into_iter().enumerate() {
        let offset = i * POLYLINE_GROUP_SIZE;
        let value = if i < 2 {
            i64::try_from(group).map_err(|_| CodecError::Overflow { offset })?
        } else {
            values[i - 2]
                .checked_add(zigzag_decode(group))
                .ok_or(CodecError::Overflow { offset })?
        };
        values.push(value);
    }
    Ok(values)
}

/// Decode one ring stream and scale it to degrees.
///
/// # Errors
///
/// Everything [`decode_raw`] reports, plus
/// [`DecodeError::OddCoordinateCount`] when the stream does not pair up.
pub fn decode_ring(text: &[u8], precision: u32) -> Result<Ring, DecodeError> {
    ring_at(0, text, precision)
}

fn ring_at(ring: usize, text: &[u8], precision: u32) -> Result<Ring, DecodeError> {
    let values = decode_raw(text)?;
    if values.len() % 2 != 0 {
        return Err(DecodeError::OddCoordinateCount {
            ring,
            count: values.len(),
        });
    }
    Ok(Ring::new(
        values
            .chunks_exact(2)
            .map(|pair| Coordinate::new(to_degrees(pair[0], precision), to_degrees(pair[1], precision)))
            .collect(),
    ))
}

/// Decode a full polyline record: a classification digit followed by one
/// or more `0x01`-delimited ring streams. Each ring becomes its own
/// single-ring polygon.
///
/// # Errors
///
/// [`DecodeError::MissingClassification`] when the first byte is not an
/// ASCII digit, or any ring error.
pub fn decode_record(line: &str, precision: u32) -> Result<Feature, DecodeError> {
    let bytes = line.as_bytes();
    let classification = match bytes.first() {
        Some(b) if b.is_ascii_digit() => b - b'0',
        _ => return Err(DecodeError::MissingClassification),
    };

    let polygons = bytes[1..]
        .split(|&b| b == RING_DELIMITER)
        .enumerate()
        .map(|(i, segment)| ring_at(i, segment, precision).map(|ring| Polygon::new(vec![ring])))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Feature::new(
        MultiPolygon::new(polygons),
        Properties::classified(classification),
    ))
}

/// Decode a grid line: plain absolute groups, no classification and no
/// deltas, paired into positions.
///
/// # Errors
///
/// [`DecodeError::Codec`] or [`DecodeError::OddCoordinateCount`].
pub fn decode_grid_line(line: &str, precision: u32) -> Result<Vec<GridPoint>, DecodeError> {
    let groups = decode_var_int_array(line.as_bytes(), Alphabet::POLYLINE, POLYLINE_GROUP_SIZE)?;
    if groups.len() % 2 != 0 {
        return Err(DecodeError::OddCoordinateCount {
            ring: 0,
            count: groups.len(),
        });
    }
    // groups are < 90^4, so the casts are lossless
    #[allow(clippy::cast_possible_wrap)]
    let points = groups
        .chunks_exact(2)
        .map(|pair| {
            GridPoint::new(
                to_degrees(pair[0] as i64, precision),
                to_degrees(pair[1] as i64, precision),
            )
        })
        .collect();
    Ok(points)
}

/// Line-framed decoder producing one [`Feature`] per polyline record.
#[derive(Clone, Copy, Debug)]
pub struct PolylineDecoder {
    precision: u32,
}

impl PolylineDecoder {
    #[must_use]
    pub fn new(config: &DecodeConfig) -> Self {
        Self {
            precision: config.precision,
        }
    }
}

impl Default for PolylineDecoder {
    fn default() -> Self {
        Self::new(&DecodeConfig::default())
    }
}

impl RecordDecoder for PolylineDecoder {
    type Record = Feature;

    fn framing(&self) -> Framing {
        Framing::Lines
    }

    fn decode(&mut self, unit: &str) -> Result<Vec<Feature>, DecodeError> {
        decode_record(unit, self.precision).map(|feature| vec![feature])
    }

    fn vertex_count(&self, record: &Feature) -> usize {
        record.vertex_count()
    }
}

/// Line-framed decoder producing one [`GridPoint`] per position.
#[derive(Clone, Copy, Debug)]
pub struct GridPointDecoder {
    precision: u32,
}

impl GridPointDecoder {
    #[must_use]
    pub fn new(config: &DecodeConfig) -> Self {
        Self {
            precision: config.precision,
        }
    }
}

impl Default for GridPointDecoder {
    fn default() -> Self {
        Self::new(&DecodeConfig::default())
    }
}

impl RecordDecoder for GridPointDecoder {
    type Record = GridPoint;

    fn framing(&self) -> Framing {
        Framing::Lines
    }

    fn decode(&mut self, unit: &str) -> Result<Vec<GridPoint>, DecodeError> {
        decode_grid_line(unit, self.precision)
    }

    fn vertex_count(&self, _record: &GridPoint) -> usize {
        1
    }
}
