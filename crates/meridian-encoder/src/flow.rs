use meridian_types::FlowLinks;
use meridian_wire::Alphabet;
use meridian_wire::varbase::encode_var_int;
use meridian_wire::zigzag::zigzag_encode;

/// Encode a flow row as alternating index and value tokens.
///
/// Each token uses the fewest digits of its alphabet. Because the two
/// alphabets occupy disjoint byte windows, a change of window marks the
/// token boundary and no separator is written.
#[must_use]
pub fn encode_flows(links: &FlowLinks) -> String {
    let mut out = String::new();
    for link in links {
        encode_var_int(link.target as u64, Alphabet::FLOW_INDEX, &mut out);
        encode_var_int(zigzag_encode(link.flow), Alphabet::FLOW_VALUE, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_link_tokens() {
        let links: FlowLinks = [(1, -1)].into_iter().collect();
        // index 1 → ']' + 1 = '^'; zigzag(-1) = 1 → '(' + 1 = ')'
        assert_eq!(encode_flows(&links), "^)");
    }

    #[test]
    fn multi_digit_tokens() {
        let links: FlowLinks = [(32, 26)].into_iter().collect();
        // 32 = "^]" in base 32; zigzag(26) = 52 = ")(" in base 52
        assert_eq!(encode_flows(&links), "^])(");
    }

    #[test]
    fn empty_row_is_empty_string() {
        assert_eq!(encode_flows(&FlowLinks::new()), "");
    }
}
