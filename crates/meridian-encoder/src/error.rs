use meridian_wire::CodecError;

/// Errors that can occur while producing encoded text.
///
/// Error hierarchy:
///
/// ```text
///   EncodeError
///   ├── EmptyRecord            ← add_feature called with no rings
///   ├── InvalidClassification  ← classification is not a single digit
///   ├── OutOfDomain            ← coordinate quantizes below zero
///   ├── NegativeStart          ← raw ring stream starts below zero
///   └── Codec(CodecError)      ← a value or delta does not fit its group
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EncodeError {
    #[error("record has no rings")]
    EmptyRecord,

    #[error("classification {0} is not a single decimal digit")]
    InvalidClassification(u8),

    #[error("coordinate {value} is outside the encodable domain at precision {precision}")]
    OutOfDomain { value: f64, precision: u32 },

    #[error("ring stream starts at {value}; absolute values must be non-negative")]
    NegativeStart { value: i64 },

    #[error(transparent)]
    Codec(#[from] CodecError),
}
