use meridian_types::{FlowLink, FlowLinks};
use meridian_wire::varbase::decode_var_int;
use meridian_wire::zigzag::zigzag_decode;
use meridian_wire::{Alphabet, CodecError};
use tracing::warn;

use crate::error::DecodeError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TokenClass {
    Index,
    Value,
}

impl TokenClass {
    fn of(byte: u8) -> Option<Self> {
        if Alphabet::FLOW_INDEX.contains(byte) {
            Some(Self::Index)
        } else if Alphabet::FLOW_VALUE.contains(byte) {
            Some(Self::Value)
        } else {
            None
        }
    }

    fn alphabet(self) -> Alphabet {
        match self {
            Self::Index => Alphabet::FLOW_INDEX,
            Self::Value => Alphabet::FLOW_VALUE,
        }
    }
}

/// Decode a flow string into an ordered row of links.
///
/// The string alternates index tokens and value tokens with no
/// separators. A token is a maximal run of bytes from one alphabet, so
/// the scanner only has to notice when the byte class changes:
///
/// ```text
///   ^ ] ) ( ^ )
///   └─┘ └─┘ │ │
///   idx val idx val        → [(32, 26), (1, -1)]
/// ```
///
/// Index tokens are unsigned; value tokens are zigzag-coded signed flows.
/// A target repeated within one string keeps its first value; later
/// entries are logged and dropped.
///
/// # Errors
///
/// - [`DecodeError::InvalidFlowByte`] for a byte in neither window.
/// - [`DecodeError::OrphanFlowValue`] when the string opens with a value.
/// - [`DecodeError::UnterminatedToken`] when it ends on an index.
/// - [`DecodeError::Codec`] when a token overflows, or a value is
///   `i64::MIN` and so has no mirrored counterpart.
pub fn decode_flows(text: &str) -> Result<FlowLinks, DecodeError> {
    let bytes = text.as_bytes();
    let mut links = FlowLinks::new();
    let mut pending: Option<(usize, u64)> = None;

    let mut start = 0;
    while start < bytes.len() {
        let byte = bytes[start];
        let class = TokenClass::of(byte).ok_or(DecodeError::InvalidFlowByte {
            offset: start,
            byte,
        })?;
        let end = bytes[start..]
            .iter()
            .position(|&b| TokenClass::of(b) != Some(class))
            .map_or(bytes.len(), |len| start + len);
        let raw = decode_var_int(&bytes[start..end], class.alphabet(), start)?;

        // maximal runs alternate, so an index never follows an index
        match class {
            TokenClass::Index => pending = Some((start, raw)),
            TokenClass::Value => {
                let (offset, index) = pending
                    .take()
                    .ok_or(DecodeError::OrphanFlowValue { offset: start })?;
                let target = usize::try_from(index).map_err(|_| CodecError::Overflow { offset })?;
                let flow = zigzag_decode(raw);
                flow.checked_neg().ok_or(CodecError::Overflow { offset: start })?;
                if links.contains(target) {
                    warn!(offset, target, "duplicate flow target, keeping the first");
                } else {
                    links.push(target, flow);
                }
            }
        }
        start = end;
    }

    if let Some((offset, _)) = pending {
        return Err(DecodeError::UnterminatedToken { offset });
    }
    Ok(links)
}

/// Mirror every link into its target's row with the opposite sign.
///
/// For each `(i → j, v)`, row `j` gains `(i, -v)` unless it already has an
/// entry for `i`. Existing entries are never overwritten, so running this
/// twice changes nothing the second time. Links pointing past the end of
/// `rows` are left in place and reported.
///
/// Returns the number of links added.
pub fn symmetrize(rows: &mut [FlowLinks]) -> usize {
    let mut added = 0;
    for source in 0..rows.len() {
        let links: Vec<FlowLink> = rows[source].iter().copied().collect();
        for FlowLink { target, flow } in links {
            let Some(row) = rows.get_mut(target) else {
                warn!(source, target, "flow link points outside the collection");
                continue;
            };
            if row.contains(source) {
                continue;
            }
            let Some(mirrored) = flow.checked_neg() else {
                warn!(source, target, flow, "flow has no mirrored value");
                continue;
            };
            row.push(source, mirrored);
            added += 1;
        }
    }
    added
}

/// Per-row flow totals, saturating at the `i64` bounds.
#[must_use]
pub fn net_flows(rows: &[FlowLinks]) -> Vec<i64> {
    rows.iter().map(FlowLinks::total).collect()
}
