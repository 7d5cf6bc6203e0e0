use super::*;
use crate::config::{ScanConfig, UNVERIFIED_ABI_SENTINEL, USERPROOFHUB};

const HUB_ABI: &str = r#"[
    {"type": "function", "name": "verify",
     "inputs": [{"name": "user", "type": "address"}, {"name": "proofHash", "type": "bytes32"}]},
    {"type": "function", "name": "owner", "inputs": []},
    {"type": "event", "name": "ProofVerified",
     "inputs": [{"indexed": true, "name": "user", "type": "address"},
                {"indexed": false, "name": "proofHash", "type": "bytes32"}]},
    {"type": "function", "name": "broken", "inputs": [{"type": "tuple[]"}]}
]"#;

fn hub_metadata() -> ContractMetadata {
    ContractMetadata {
        address: Some("0x00000000000000000000000000000000000000aa".to_string()),
        source_code: "contract Hub { mapping(address => bytes32) userProofHashes; }".to_string(),
        abi: HUB_ABI.to_string(),
        contract_name: "Hub".to_string(),
        ..ContractMetadata::default()
    }
}

#[test]
fn detects_selectors_events_and_keywords() {
    let scanner = Scanner::new((*USERPROOFHUB).clone()).unwrap();
    let report = scanner.detect(&hub_metadata());
    let indicators = &report.indicators;
    assert_eq!(indicators.selectors, vec!["verify(address,bytes32)"]);
    assert_eq!(indicators.events, vec!["ProofVerified(address,bytes32)"]);
    // "ProofVerified" also appears in the raw ABI text.
    assert_eq!(indicators.keywords, vec!["ProofVerified", "userProofHashes"]);
    assert_eq!(indicators.skipped.len(), 1);
    assert_eq!(indicators.skipped[0].index, 3);
    assert!(indicators.matched);
    assert_eq!(report.contract_name.as_deref(), Some("Hub"));
}

#[test]
fn unverified_contract_has_no_abi_hits() {
    let metadata = ContractMetadata {
        abi: UNVERIFIED_ABI_SENTINEL.to_string(),
        ..ContractMetadata::default()
    };
    let report = Scanner::new((*USERPROOFHUB).clone()).unwrap().detect(&metadata);
    assert!(report.indicators.selectors.is_empty());
    assert!(report.indicators.skipped.is_empty());
    assert!(!report.indicators.matched);
}

#[test]
fn invalid_abi_json_is_ignored() {
    let metadata = ContractMetadata {
        abi: "{not json".to_string(),
        contract_name: "Plain".to_string(),
        ..ContractMetadata::default()
    };
    let report = detect_indicators(&metadata, &USERPROOFHUB).unwrap();
    assert!(!report.indicators.matched);
}

#[test]
fn batch_filters_non_matches_unless_requested() {
    let unrelated = ContractMetadata {
        abi: r#"[{"type": "function", "name": "owner", "inputs": []}]"#.to_string(),
        contract_name: "Ownable".to_string(),
        ..ContractMetadata::default()
    };
    let contracts = vec![unrelated, hub_metadata()];

    let reports = scan_batch(&contracts, &USERPROOFHUB).unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].contract_name.as_deref(), Some("Hub"));

    let mut config: ScanConfig = (*USERPROOFHUB).clone();
    config.include_non_matches = true;
    let reports = scan_batch(&contracts, &config).unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].contract_name.as_deref(), Some("Ownable"));
}

#[test]
fn report_serialises_with_explorer_style_keys() {
    let report = Scanner::new((*USERPROOFHUB).clone()).unwrap().detect(&hub_metadata());
    let json = serde_json::to_value(&report).unwrap();
    assert!(json.get("contractName").is_some());
    assert!(json.get("sourceLastVerified").is_some());
    assert_eq!(json["indicators"]["matched"], serde_json::Value::Bool(true));
    assert!(json.get("network").is_none());
}
