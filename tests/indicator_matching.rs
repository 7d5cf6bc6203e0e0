use std::collections::BTreeMap;

use abi_sigscan::abi::{parse_abi, selector_from_signature, topic_from_signature, Fingerprint};
use abi_sigscan::config::MalformedPolicy;
use abi_sigscan::indicators::{
    match_indicators, scan_entries, IndicatorError, IndicatorTable,
};

const ERC20_ABI: &str = include_str!("fixtures/erc20_abi.json");

fn known_table() -> IndicatorTable {
    let mut expected = BTreeMap::new();
    expected.insert(
        "transfer(address,uint256)".to_string(),
        hex::decode("a9059cbb").unwrap(),
    );
    expected.insert(
        "Transfer(address,address,uint256)".to_string(),
        hex::decode("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef").unwrap(),
    );
    expected.insert(
        "mint(address,uint256)".to_string(),
        selector_from_signature("mint(address,uint256)").as_bytes().to_vec(),
    );
    IndicatorTable::from_bytes_map(&expected).unwrap()
}

#[test]
fn erc20_fixture_hits_known_signatures_only() {
    let parsed = parse_abi(ERC20_ABI).unwrap();
    let matched = match_indicators(&parsed.entries, &known_table());
    let matched: Vec<&str> = matched.iter().map(String::as_str).collect();
    assert_eq!(
        matched,
        ["Transfer(address,address,uint256)", "transfer(address,uint256)"]
    );
}

#[test]
fn known_plus_unrelated_function_matches_exactly_the_known_one() {
    let abi = r#"[
        {"type":"function","name":"transfer","inputs":[{"name":"to","type":"address"},{"name":"v","type":"uint256"}]},
        {"type":"function","name":"frobnicate","inputs":[{"type":"uint8"}]}
    ]"#;
    let parsed = parse_abi(abi).unwrap();
    let matched = match_indicators(&parsed.entries, &known_table());
    assert_eq!(matched.len(), 1);
    assert!(matched.contains("transfer(address,uint256)"));
}

#[test]
fn renamed_parameters_do_not_hide_a_match() {
    let abi = r#"[{"inputs":[{"internalType":"address payable","name":"recipient","type":"address"},
                  {"internalType":"uint256","name":"wad","type":"uint256"}],
                  "name":"transfer","type":"function","stateMutability":"nonpayable"}]"#;
    let parsed = parse_abi(abi).unwrap();
    assert!(match_indicators(&parsed.entries, &known_table()).contains("transfer(address,uint256)"));
}

#[test]
fn events_and_functions_do_not_cross_match() {
    let mut table = IndicatorTable::new();
    // An event signature registered as a selector never matches the event.
    table.insert(
        "Transfer-as-selector",
        Fingerprint::Selector(selector_from_signature("Transfer(address,address,uint256)")),
    );
    table.insert(
        "transfer-as-topic",
        Fingerprint::Topic(topic_from_signature("transfer(address,uint256)")),
    );
    let parsed = parse_abi(ERC20_ABI).unwrap();
    assert!(match_indicators(&parsed.entries, &table).is_empty());
}

#[test]
fn malformed_entries_are_skipped_without_aborting() {
    let abi = r#"[
        {"type":"function","name":"bad","inputs":[{"type":"tuple","components":"oops"}]},
        {"type":"function","name":"worse","inputs":[{"type":"tuple"}]},
        {"type":"function","name":"transfer","inputs":[{"type":"address"},{"type":"uint256"}]}
    ]"#;
    let parsed = parse_abi(abi).unwrap();
    for policy in [MalformedPolicy::Skip, MalformedPolicy::Warn] {
        let outcome = scan_entries(&parsed.entries, &known_table(), policy);
        assert_eq!(outcome.malformed.len(), 2);
        assert_eq!(outcome.malformed[0].index, 0);
        assert_eq!(outcome.malformed[1].index, 1);
        assert!(outcome.selectors.contains("transfer(address,uint256)"));
        assert!(outcome.is_match());
    }
}

#[test]
fn expected_bytes_of_other_lengths_are_rejected() {
    let mut expected = BTreeMap::new();
    expected.insert("short".to_string(), vec![0xa9, 0x05, 0x9c]);
    let err = IndicatorTable::from_bytes_map(&expected).unwrap_err();
    assert!(matches!(err, IndicatorError::InvalidLength { len: 3, .. }));
}

#[test]
fn empty_table_matches_nothing() {
    let parsed = parse_abi(ERC20_ABI).unwrap();
    assert!(match_indicators(&parsed.entries, &IndicatorTable::new()).is_empty());
}
