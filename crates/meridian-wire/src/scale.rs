/// Offset subtracted after scaling so the non-negative wire range maps
/// onto `[-180, …)` degrees. Applied to both axes.
pub const DOMAIN_OFFSET: f64 = 180.0;

/// Default number of decimal digits carried by a coordinate integer.
pub const DEFAULT_PRECISION: u32 = 5;

/// `10^precision` as a float divisor.
#[must_use]
pub fn scale_factor(precision: u32) -> f64 {
    10f64.powi(i32::try_from(precision).unwrap_or(i32::MAX))
}

/// Convert a decoded coordinate integer to degrees.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn to_degrees(raw: i64, precision: u32) -> f64 {
    raw as f64 / scale_factor(precision) - DOMAIN_OFFSET
}

/// Quantize degrees to the nearest coordinate integer.
///
/// Returns `None` when the result is negative or not finite, i.e. the
/// value lies below the encodable domain.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn quantize(degrees: f64, precision: u32) -> Option<i64> {
    let raw = ((degrees + DOMAIN_OFFSET) * scale_factor(precision)).round();
    (raw.is_finite() && raw >= 0.0 && raw < 9.0e18).then_some(raw as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degrees_roundtrip_at_default_precision() {
        for deg in [-180.0, -73.985_42, 0.0, 35.686_01, 179.999_99] {
            let raw = quantize(deg, DEFAULT_PRECISION).unwrap();
            assert!((to_degrees(raw, DEFAULT_PRECISION) - deg).abs() < 1e-9);
        }
    }

    #[test]
    fn below_domain_is_rejected() {
        assert_eq!(quantize(-180.5, DEFAULT_PRECISION), None);
        assert_eq!(quantize(f64::NAN, DEFAULT_PRECISION), None);
    }

    #[test]
    fn zero_raw_is_minus_180() {
        assert!((to_degrees(0, 5) + 180.0).abs() < f64::EPSILON);
    }
}
