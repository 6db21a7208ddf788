/// Map a signed integer onto the unsigned line so small magnitudes of
/// either sign stay small: `0, -1, 1, -2, 2 …` → `0, 1, 2, 3, 4 …`.
///
/// Used for polyline deltas and flow values, which are both signed but
/// travel as non-negative digit strings.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`zigzag_encode`].
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_values_interleave() {
        let encoded: Vec<u64> = [0, -1, 1, -2, 2].into_iter().map(zigzag_encode).collect();
        assert_eq!(encoded, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn roundtrip_extremes() {
        for value in [0, 1, -1, 12_345, -12_345, i64::MAX, i64::MIN] {
            assert_eq!(zigzag_decode(zigzag_encode(value)), value);
        }
    }
}
