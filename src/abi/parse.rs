use serde::de::IgnoredAny;
use serde::Deserialize;

use crate::config::MAX_TUPLE_DEPTH;

use super::error::{AbiError, AbiResult};
use super::types::AbiEntry;

/// JSON nesting accepted inside one entry: the entry object, its parameter
/// list, two levels per tuple up to one past [`MAX_TUPLE_DEPTH`] and the
/// innermost parameter object. An entry nested exactly one tuple too deep
/// still decodes and is refused by canonicalisation; anything deeper is
/// rejected before decoding.
const MAX_ENTRY_NESTING: usize = 2 * (MAX_TUPLE_DEPTH + 1) + 3;

/// ABI entry that could not be decoded into an [`AbiEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEntry {
    /// Position of the entry in the ABI array.
    pub index: usize,
    /// Decoder message.
    pub reason: String,
}

/// Result of decoding an ABI document entry by entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedAbi {
    /// Successfully decoded entries in document order.
    pub entries: Vec<AbiEntry>,
    /// Entries that were not JSON objects of the expected shape.
    pub rejected: Vec<RejectedEntry>,
}

/// Raw text of one top-level array element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ElementSpan<'a> {
    text: &'a str,
    /// Deepest object/array nesting inside the element; 1 for a flat object.
    nesting: usize,
}

/// Decodes an ABI JSON array.
///
/// Only a document that is not an array, or whose array structure is broken,
/// fails as a whole. Elements are delimited without decoding them, so one
/// undecodable or hostile element is recorded in [`ParsedAbi::rejected`] and
/// the remaining elements are still returned.
pub fn parse_abi(text: &str) -> AbiResult<ParsedAbi> {
    let spans = split_elements(text)?;

    let mut parsed = ParsedAbi {
        entries: Vec::with_capacity(spans.len()),
        rejected: Vec::new(),
    };
    for (index, span) in spans.into_iter().enumerate() {
        match decode_element(span) {
            Ok(entry) => parsed.entries.push(entry),
            Err(reason) => {
                log::warn!("skipping undecodable ABI entry #{index}: {reason}");
                parsed.rejected.push(RejectedEntry { index, reason });
            }
        }
    }
    Ok(parsed)
}

fn decode_element(span: ElementSpan<'_>) -> Result<AbiEntry, String> {
    if span.nesting > MAX_ENTRY_NESTING {
        return Err(AbiError::TupleDepthExceeded {
            limit: MAX_TUPLE_DEPTH,
        }
        .to_string());
    }
    // Nesting is already bounded, so serde_json's own limit would only cut
    // legitimate entries short.
    let mut deserializer = serde_json::Deserializer::from_str(span.text);
    deserializer.disable_recursion_limit();
    let entry = AbiEntry::deserialize(&mut deserializer).map_err(|err| err.to_string())?;
    deserializer.end().map_err(|err| err.to_string())?;
    Ok(entry)
}

fn is_json_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Splits the top-level array into element spans and measures the nesting of
/// each, in one pass over the bytes and without recursion.
fn split_elements(text: &str) -> AbiResult<Vec<ElementSpan<'_>>> {
    let body = text.trim_matches(is_json_whitespace);
    if !body.starts_with('[') {
        return Err(match serde_json::from_str::<IgnoredAny>(text) {
            Ok(_) => AbiError::NotAnArray,
            Err(err) => AbiError::InvalidJson(err.to_string()),
        });
    }

    let invalid = |reason: &str| AbiError::InvalidJson(reason.to_string());
    let bytes = body.as_bytes();
    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut nesting = 0usize;
    let mut start = 1usize;
    let mut in_string = false;
    let mut escaped = false;

    for (pos, &byte) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                nesting = nesting.max(depth - 1);
            }
            b']' | b'}' if depth == 1 => {
                if byte != b']' {
                    return Err(invalid("mismatched closing brace for the ABI array"));
                }
                let element = body[start..pos].trim_matches(is_json_whitespace);
                if element.is_empty() {
                    if !spans.is_empty() {
                        return Err(invalid("trailing comma in ABI array"));
                    }
                } else {
                    spans.push(ElementSpan {
                        text: element,
                        nesting,
                    });
                }
                if !body[pos + 1..].is_empty() {
                    return Err(invalid("trailing characters after ABI array"));
                }
                return Ok(spans);
            }
            b']' | b'}' => depth -= 1,
            b',' if depth == 1 => {
                let element = body[start..pos].trim_matches(is_json_whitespace);
                if element.is_empty() {
                    return Err(invalid("empty element in ABI array"));
                }
                spans.push(ElementSpan {
                    text: element,
                    nesting,
                });
                start = pos + 1;
                nesting = 0;
            }
            _ => {}
        }
    }
    Err(invalid("unterminated ABI array"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::{Components, EntryKind};

    #[test]
    fn decodes_solidity_abi_shape() {
        let text = r#"[
            {"type": "function", "name": "transfer", "stateMutability": "nonpayable",
             "inputs": [{"name": "to", "type": "address", "internalType": "address"},
                        {"name": "amount", "type": "uint256"}],
             "outputs": [{"name": "", "type": "bool"}]},
            {"type": "event", "name": "Transfer", "anonymous": false,
             "inputs": [{"indexed": true, "name": "from", "type": "address"}]},
            {"type": "constructor", "inputs": []},
            {"type": "receive"}
        ]"#;
        let parsed = parse_abi(text).unwrap();
        assert!(parsed.rejected.is_empty());
        assert_eq!(parsed.entries.len(), 4);
        assert_eq!(parsed.entries[0].kind, EntryKind::Function);
        assert_eq!(parsed.entries[0].params[1].ty, "uint256");
        assert_eq!(parsed.entries[1].kind, EntryKind::Event);
        assert_eq!(parsed.entries[2].kind, EntryKind::Constructor);
        assert_eq!(parsed.entries[3].name, None);
    }

    #[test]
    fn unknown_or_missing_kind_is_other() {
        let parsed = parse_abi(r#"[{"type": "weird", "name": "x"}, {"name": "y"}]"#).unwrap();
        assert!(parsed.entries.iter().all(|e| e.kind == EntryKind::Other));
    }

    #[test]
    fn components_states_are_distinguished() {
        let parsed = parse_abi(
            r#"[{"type": "function", "name": "f", "inputs": [
                {"type": "tuple", "components": [{"type": "uint256"}]},
                {"type": "tuple"},
                {"type": "tuple", "components": null},
                {"type": "tuple", "components": "uint256"},
                {"type": "tuple", "components": [42]}
            ]}]"#,
        )
        .unwrap();
        let params = &parsed.entries[0].params;
        assert!(matches!(params[0].components, Components::List(ref items) if items.len() == 1));
        assert_eq!(params[1].components, Components::Absent);
        assert_eq!(params[2].components, Components::Absent);
        assert_eq!(params[3].components, Components::Invalid);
        assert_eq!(params[4].components, Components::Invalid);
    }

    #[test]
    fn bad_element_does_not_reject_document() {
        let parsed = parse_abi(
            r#"[7, {"type": "function", "name": "ok", "inputs": []}, {"type": "event", "inputs": "nope"}]"#,
        )
        .unwrap();
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(
            parsed.rejected.iter().map(|r| r.index).collect::<Vec<_>>(),
            vec![0, 2]
        );
    }

    #[test]
    fn document_level_failures() {
        assert!(matches!(parse_abi("not json"), Err(AbiError::InvalidJson(_))));
        assert_eq!(parse_abi(r#"{"type": "function"}"#), Err(AbiError::NotAnArray));
        assert_eq!(parse_abi("42"), Err(AbiError::NotAnArray));
        for broken in ["[", "[{}", "[{},]", "[,{}]", "[{}] x", "[{}}", r#"["]"#] {
            assert!(
                matches!(parse_abi(broken), Err(AbiError::InvalidJson(_))),
                "{broken}"
            );
        }
    }

    #[test]
    fn empty_array_has_no_entries() {
        assert_eq!(parse_abi(" [ ] ").unwrap(), ParsedAbi::default());
    }

    #[test]
    fn strings_do_not_confuse_element_boundaries() {
        let parsed = parse_abi(
            r#"[{"type": "function", "name": "a", "inputs": [{"type": "string", "name": "],[{\"}"}]},
                {"type": "event", "name": "B", "inputs": []}]"#,
        )
        .unwrap();
        assert!(parsed.rejected.is_empty());
        assert_eq!(parsed.entries.len(), 2);
        assert_eq!(parsed.entries[1].name.as_deref(), Some("B"));
    }

    #[test]
    fn element_nesting_is_measured() {
        let spans = split_elements(r#"[{"a": [1, {"b": []}]}, 7]"#).unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].nesting, 4);
        assert_eq!(spans[1].nesting, 0);
        assert_eq!(spans[1].text, "7");
    }

    #[test]
    fn over_nested_element_is_rejected_alone() {
        let mut param = String::from(r#"{"type": "uint8"}"#);
        for _ in 0..500 {
            param = format!(r#"{{"type": "tuple", "components": [{param}]}}"#);
        }
        let text = format!(
            r#"[{{"type": "function", "name": "deep", "inputs": [{param}]}},
                {{"type": "function", "name": "ok", "inputs": []}}]"#
        );
        let parsed = parse_abi(&text).unwrap();
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.entries[0].name.as_deref(), Some("ok"));
        assert_eq!(parsed.rejected.len(), 1);
        assert_eq!(parsed.rejected[0].index, 0);
        assert_eq!(
            parsed.rejected[0].reason,
            AbiError::TupleDepthExceeded {
                limit: MAX_TUPLE_DEPTH
            }
            .to_string()
        );
    }

    #[test]
    fn params_alias_is_accepted() {
        let parsed = parse_abi(r#"[{"type": "function", "name": "f", "params": [{"type": "bool"}]}]"#)
            .unwrap();
        assert_eq!(parsed.entries[0].params[0].ty, "bool");
    }
}
