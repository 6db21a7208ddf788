use crate::error::CodecError;

/// Bytes per integer in ring and grid coordinate streams.
pub const POLYLINE_GROUP_SIZE: usize = 4;

/// Separates the rings of one polyline record. Lies below every alphabet
/// window, so it can never be mistaken for a digit.
pub const RING_DELIMITER: u8 = 0x01;

/// A contiguous code-point window used as a digit alphabet.
///
/// Digit value = `byte - shift`. A byte is a valid digit iff the result
/// lies in `[0, base)`, so the alphabet occupies exactly the bytes
/// `shift ..= shift + base - 1`.
///
/// ```text
/// ┌─────────────┬──────┬───────┬──────────────┬──────────────────────┐
/// │ Alphabet    │ Base │ Shift │ Window       │ Used for             │
/// ├─────────────┼──────┼───────┼──────────────┼──────────────────────┤
/// │ POLYLINE    │ 90   │ 32    │ 0x20..=0x79  │ ring coordinates     │
/// │ FLOW_VALUE  │ 52   │ 40    │ 0x28..=0x5B  │ flow magnitudes      │
/// │ FLOW_INDEX  │ 32   │ 93    │ 0x5D..=0x7C  │ flow target indices  │
/// └─────────────┴──────┴───────┴──────────────┴──────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Alphabet {
    base: u32,
    shift: u32,
}

impl Alphabet {
    /// Ring coordinates: 4-byte groups of base-90 digits.
    pub const POLYLINE: Self = Self::new(90, 32);
    /// Flow link target indices.
    pub const FLOW_INDEX: Self = Self::new(32, 93);
    /// Flow link values (zigzag-encoded).
    pub const FLOW_VALUE: Self = Self::new(52, 40);

    /// Create an alphabet from a base and a code-point shift.
    ///
    /// # Panics
    ///
    /// Panics if `base < 2` or the window would run past `0xFF`.
    #[must_use]
    pub const fn new(base: u32, shift: u32) -> Self {
        assert!(base >= 2, "alphabet base must be at least 2");
        assert!(shift + base <= 256, "alphabet window must fit in a byte");
        Self { base, shift }
    }

    #[must_use]
    pub const fn base(self) -> u32 {
        self.base
    }

    #[must_use]
    pub const fn shift(self) -> u32 {
        self.shift
    }

    /// Whether `byte` is a digit of this alphabet.
    #[must_use]
    pub const fn contains(self, byte: u8) -> bool {
        let code = byte as u32;
        code >= self.shift && code < self.shift + self.base
    }
}

/// Encode a single digit value as its byte in `alphabet`.
///
/// # Errors
///
/// [`CodecError::ValueTooLarge`] if `value >= base`.
pub fn encode_digit(value: u32, alphabet: Alphabet) -> Result<u8, CodecError> {
    if value >= alphabet.base {
        return Err(CodecError::ValueTooLarge {
            value: u64::from(value),
            base: alphabet.base,
            width: 1,
        });
    }
    // shift + base <= 256 is guaranteed by `Alphabet::new`.
    #[allow(clippy::cast_possible_truncation)]
    Ok((alphabet.shift + value) as u8)
}

/// Decode a single digit byte.
///
/// # Errors
///
/// [`CodecError::DigitOutOfRange`] if the byte lies outside the window.
/// The reported offset is `0`; use the group and array functions for
/// positional diagnostics.
pub fn decode_digit(byte: u8, alphabet: Alphabet) -> Result<u32, CodecError> {
    digit_at(byte, 0, alphabet)
}

fn digit_at(byte: u8, offset: usize, alphabet: Alphabet) -> Result<u32, CodecError> {
    if alphabet.contains(byte) {
        Ok(u32::from(byte) - alphabet.shift)
    } else {
        Err(CodecError::DigitOutOfRange {
            offset,
            byte,
            base: alphabet.base,
            shift: alphabet.shift,
        })
    }
}

/// Accumulate digits most-significant first. `offset` is the position of
/// `digits[0]` within the caller's input and only feeds error reports.
fn accumulate(digits: &[u8], offset: usize, alphabet: Alphabet) -> Result<u64, CodecError> {
    let base = u64::from(alphabet.base);
    let mut value: u64 = 0;
    for (i, &byte) in digits.iter().enumerate() {
        let digit = digit_at(byte, offset + i, alphabet)?;
        value = value
            .checked_mul(base)
            .and_then(|v| v.checked_add(u64::from(digit)))
            .ok_or(CodecError::Overflow { offset })?;
    }
    Ok(value)
}

/// Decode one fixed-width group: `Σ digit_k · base^(n-1-k)`.
///
/// # Errors
///
/// [`CodecError::DigitOutOfRange`] or [`CodecError::Overflow`].
pub fn decode_group(group: &[u8], alphabet: Alphabet) -> Result<u64, CodecError> {
    accumulate(group, 0, alphabet)
}

/// Split `text` into `group_size`-byte groups and decode each one.
///
/// # Errors
///
/// - [`CodecError::TruncatedGroup`] if the length is not a multiple of
///   `group_size`.
/// - [`CodecError::DigitOutOfRange`] for the first invalid byte, with its
///   offset in `text`.
///
/// # Panics
///
/// Panics if `group_size` is zero.
pub fn decode_var_int_array(
    text: &[u8],
    alphabet: Alphabet,
    group_size: usize,
) -> Result<Vec<u64>, CodecError> {
    assert!(group_size > 0, "group size must be non-zero");
    if text.len() % group_size != 0 {
        return Err(CodecError::TruncatedGroup {
            len: text.len(),
            group_size,
        });
    }

    text.chunks_exact(group_size)
        .enumerate()
        .map(|(i, group)| accumulate(group, i * group_size, alphabet))
        .collect()
}

/// Append `value` as exactly `width` digits, most significant first.
///
/// # Errors
///
/// [`CodecError::ValueTooLarge`] if `value >= base^width`. Nothing is
/// written in that case.
pub fn encode_group(
    value: u64,
    alphabet: Alphabet,
    width: usize,
    out: &mut String,
) -> Result<(), CodecError> {
    let base = u64::from(alphabet.base);
    let mut digits = vec![0u8; width];
    let mut rest = value;
    for slot in digits.iter_mut().rev() {
        #[allow(clippy::cast_possible_truncation)]
        let digit = (rest % base) as u32;
        *slot = encode_digit(digit, alphabet)?;
        rest /= base;
    }
    if rest != 0 {
        return Err(CodecError::ValueTooLarge {
            value,
            base: alphabet.base,
            width,
        });
    }
    out.extend(digits.into_iter().map(char::from));
    Ok(())
}

/// Decode a variable-length token. The token's length is its only
/// delimiter; every byte must belong to `alphabet`.
///
/// `offset` is the token's position in the enclosing string.
///
/// # Errors
///
/// [`CodecError::EmptyToken`], [`CodecError::DigitOutOfRange`] or
/// [`CodecError::Overflow`].
pub fn decode_var_int(token: &[u8], alphabet: Alphabet, offset: usize) -> Result<u64, CodecError> {
    if token.is_empty() {
        return Err(CodecError::EmptyToken { offset });
    }
    accumulate(token, offset, alphabet)
}

/// Append `value` using the fewest digits possible (at least one).
pub fn encode_var_int(value: u64, alphabet: Alphabet, out: &mut String) {
    let base = u64::from(alphabet.base);
    let mut digits = Vec::new();
    let mut rest = value;
    loop {
        #[allow(clippy::cast_possible_truncation)]
        let byte = (u64::from(alphabet.shift) + rest % base) as u8;
        digits.push(char::from(byte));
        rest /= base;
        if rest == 0 {
            break;
        }
    }
    out.extend(digits.into_iter().rev());
}
