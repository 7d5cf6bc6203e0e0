use serde::{Deserialize, Serialize};

use crate::abi::{parse_abi, AbiEntry, RejectedEntry};
use crate::config::{ConfigError, ScanConfig, UNVERIFIED_ABI_SENTINEL};
use crate::indicators::{scan_entries, scan_keywords, IndicatorTable, MalformedEntry};

use super::metadata::{normalize_sources, ContractMetadata};

/// ABI entry that was left out of matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEntry {
    /// Position of the entry in the ABI array.
    pub index: usize,
    /// Entry name, when it could be read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Why the entry was skipped.
    pub reason: String,
}

impl From<&MalformedEntry> for SkippedEntry {
    fn from(entry: &MalformedEntry) -> Self {
        Self {
            index: entry.index,
            name: entry.name.clone(),
            reason: entry.error.to_string(),
        }
    }
}

impl From<&RejectedEntry> for SkippedEntry {
    fn from(entry: &RejectedEntry) -> Self {
        Self {
            index: entry.index,
            name: None,
            reason: entry.reason.clone(),
        }
    }
}

/// Indicator hits for one contract. Every list is sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicators {
    /// Function indicators whose selector appears in the ABI.
    pub selectors: Vec<String>,
    /// Event indicators whose topic appears in the ABI.
    pub events: Vec<String>,
    /// Keywords found in sources, contract name or raw ABI text.
    pub keywords: Vec<String>,
    /// ABI entries that could not be fingerprinted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedEntry>,
    /// `true` when any of the hit lists is non-empty.
    pub matched: bool,
}

/// Findings for one contract, shaped like the explorer metadata it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorReport {
    /// Network label, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    /// Contract address, when known.
    pub address: Option<String>,
    /// Explorer contract name; `None` when the record carried none.
    pub contract_name: Option<String>,
    /// Explorer compiler version.
    pub compiler_version: Option<String>,
    /// Explorer proxy flag.
    pub proxy: Option<String>,
    /// Explorer implementation address.
    pub implementation: Option<String>,
    /// Explorer last-verified timestamp.
    pub source_last_verified: Option<String>,
    /// Indicator hits.
    pub indicators: Indicators,
}

/// Compiled scan configuration: the indicator table is derived once and
/// reused for every contract.
#[derive(Debug, Clone)]
pub struct Scanner {
    config: ScanConfig,
    table: IndicatorTable,
}

impl Scanner {
    /// Compiles `config` into a scanner.
    pub fn new(config: ScanConfig) -> Result<Self, ConfigError> {
        let table = config.indicator_table()?;
        Ok(Self { config, table })
    }

    /// Configuration the scanner was built from.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Fingerprint table derived from the configuration.
    pub fn table(&self) -> &IndicatorTable {
        &self.table
    }

    /// Runs selector, event and keyword detection over one contract.
    pub fn detect(&self, metadata: &ContractMetadata) -> IndicatorReport {
        let (entries, rejected) = decode_entries(metadata);
        let outcome = scan_entries(&entries, &self.table, self.config.malformed_policy);

        let mut text_parts = normalize_sources(&metadata.source_code);
        text_parts.push(metadata.contract_name.clone());
        text_parts.push(metadata.abi.clone());
        let keywords = scan_keywords(&text_parts.join("\n"), &self.config.keywords);

        let mut skipped: Vec<SkippedEntry> = rejected.iter().map(SkippedEntry::from).collect();
        skipped.extend(outcome.malformed.iter().map(SkippedEntry::from));
        skipped.sort_by_key(|entry| entry.index);

        let matched = outcome.is_match() || !keywords.is_empty();
        log::debug!(
            "scanned {}: {} selector, {} event, {} keyword hits, {} skipped",
            metadata.address.as_deref().unwrap_or(&metadata.contract_name),
            outcome.selectors.len(),
            outcome.events.len(),
            keywords.len(),
            skipped.len()
        );

        IndicatorReport {
            network: metadata.network.clone(),
            address: metadata.address.clone(),
            contract_name: Some(metadata.contract_name.clone()).filter(|name| !name.is_empty()),
            compiler_version: metadata.compiler_version.clone(),
            proxy: metadata.proxy.clone(),
            implementation: metadata.implementation.clone(),
            source_last_verified: metadata.last_verified.clone(),
            indicators: Indicators {
                selectors: outcome.selectors.into_iter().collect(),
                events: outcome.events.into_iter().collect(),
                keywords: keywords.into_iter().collect(),
                skipped,
                matched,
            },
        }
    }
}

/// Decodes the ABI text. Unverified contracts and undecodable documents
/// contribute no entries.
fn decode_entries(metadata: &ContractMetadata) -> (Vec<AbiEntry>, Vec<RejectedEntry>) {
    let abi = metadata.abi.trim();
    if abi.is_empty() || abi == UNVERIFIED_ABI_SENTINEL {
        return (Vec::new(), Vec::new());
    }
    match parse_abi(abi) {
        Ok(parsed) => (parsed.entries, parsed.rejected),
        Err(err) => {
            log::warn!(
                "ignoring ABI of {}: {err}",
                metadata.address.as_deref().unwrap_or(&metadata.contract_name)
            );
            (Vec::new(), Vec::new())
        }
    }
}

/// One-off detection; prefer [`Scanner`] when scanning several contracts.
pub fn detect_indicators(
    metadata: &ContractMetadata,
    config: &ScanConfig,
) -> Result<IndicatorReport, ConfigError> {
    Ok(Scanner::new(config.clone())?.detect(metadata))
}
