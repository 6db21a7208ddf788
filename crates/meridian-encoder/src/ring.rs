use meridian_types::{Coordinate, Ring};
use meridian_wire::scale::quantize;
use meridian_wire::varbase::encode_group;
use meridian_wire::zigzag::zigzag_encode;
use meridian_wire::{Alphabet, POLYLINE_GROUP_SIZE};

use crate::error::EncodeError;

/// Encode an interleaved `lon, lat, lon, lat …` integer stream as one ring.
///
/// The first value of each axis is written as-is; every later value is
/// written as the zigzag delta from the previous value of the same axis.
///
/// ```text
///   values:  L0   A0   L1       A1       L2       …
///   groups:  L0   A0   zz(L1-L0) zz(A1-A0) zz(L2-L1) …
/// ```
///
/// # Errors
///
/// - [`EncodeError::NegativeStart`] if either absolute value is negative.
/// - [`EncodeError::Codec`] if a value or delta needs more than four digits.
pub fn encode_raw_ring(values: &[i64], out: &mut String) -> Result<(), EncodeError> {
    for (i, &value) in values.iter().enumerate() {
        let group = if i < 2 {
            u64::try_from(value).map_err(|_| EncodeError::NegativeStart { value })?
        } else {
            zigzag_encode(value - values[i - 2])
        };
        encode_group(group, Alphabet::POLYLINE, POLYLINE_GROUP_SIZE, out)?;
    }
    Ok(())
}

/// Quantize a ring's coordinates into the interleaved integer stream.
///
/// # Errors
///
/// [`EncodeError::OutOfDomain`] for a coordinate below −180 or not finite.
pub fn quantize_ring(coords: &[Coordinate], precision: u32) -> Result<Vec<i64>, EncodeError> {
    let mut values = Vec::with_capacity(coords.len() * 2);
    for c in coords {
        for value in [c.lon, c.lat] {
            let raw =
                quantize(value, precision).ok_or(EncodeError::OutOfDomain { value, precision })?;
            values.push(raw);
        }
    }
    Ok(values)
}

/// Encode a ring of coordinates at `precision` decimal digits.
///
/// # Errors
///
/// See [`quantize_ring`] and [`encode_raw_ring`].
pub fn encode_ring(ring: &Ring, precision: u32, out: &mut String) -> Result<(), EncodeError> {
    let values = quantize_ring(&ring.coords, precision)?;
    encode_raw_ring(&values, out)
}
