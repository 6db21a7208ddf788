/// Errors raised by the variable-base text codec.
///
/// Every variant describes a single malformed token or group. Callers one
/// layer up (the record decoders) treat these as fatal to the record being
/// decoded and skip it, never to the whole stream.
///
/// ```text
///   CodecError
///   ├── DigitOutOfRange   ← byte outside the alphabet's code-point window
///   ├── TruncatedGroup    ← input length is not a multiple of the group size
///   ├── EmptyToken        ← variable-length token with no digits
///   ├── Overflow          ← accumulated value does not fit in a u64
///   └── ValueTooLarge     ← encode: value needs more digits than the width
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// A byte decoded to a digit that is negative or `>= base`.
    #[error("byte {byte:#04X} at offset {offset} is outside the base-{base} window starting at {shift:#04X}")]
    DigitOutOfRange {
        offset: usize,
        byte: u8,
        base: u32,
        shift: u32,
    },

    /// Fixed-width decoding found a partial group at the end of the input.
    #[error("input of {len} bytes is not a whole number of {group_size}-byte groups")]
    TruncatedGroup { len: usize, group_size: usize },

    /// A variable-length token had no digits at all.
    #[error("empty token at offset {offset}")]
    EmptyToken { offset: usize },

    /// The decoded integer exceeded `u64::MAX`.
    #[error("integer overflow while decoding token at offset {offset}")]
    Overflow { offset: usize },

    /// The value cannot be represented in `width` digits of this base.
    #[error("value {value} does not fit in {width} base-{base} digits")]
    ValueTooLarge { value: u64, base: u32, width: usize },
}
