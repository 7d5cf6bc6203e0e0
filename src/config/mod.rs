//! Scanner configuration and built-in indicator presets.
//!
//! A [`ScanConfig`] lists the canonical function and event signatures to
//! flag, optional precomputed fingerprints, and the source keywords checked
//! alongside them. Configurations are plain serde data so they can be loaded
//! from JSON files; the fixed hash geometry and traversal bounds are
//! compile-time constants and deliberately not configurable.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::indicators::{IndicatorError, IndicatorTable};

/// Maximum tuple nesting accepted while canonicalising a parameter.
pub const MAX_TUPLE_DEPTH: usize = 64;

/// ABI text explorers return for contracts without verified source.
pub const UNVERIFIED_ABI_SENTINEL: &str = "Contract source code not verified";

/// What to do with ABI entries whose signature cannot be derived.
///
/// Either way the entry is skipped, the scan continues and the entry is
/// listed in the report; the policy only controls logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Log at debug level only.
    Skip,
    /// Log a warning for every malformed entry.
    #[default]
    Warn,
}

/// Errors raised while loading or compiling a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Io(String),
    /// The configuration text was not valid JSON of the expected shape.
    InvalidJson(String),
    /// A precomputed fingerprint was rejected.
    Indicator(IndicatorError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(reason) => write!(f, "failed to read configuration: {reason}"),
            ConfigError::InvalidJson(reason) => write!(f, "invalid configuration: {reason}"),
            ConfigError::Indicator(err) => write!(f, "invalid indicator: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<IndicatorError> for ConfigError {
    fn from(err: IndicatorError) -> Self {
        ConfigError::Indicator(err)
    }
}

/// Indicators and reporting options for a scan.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Canonical function signatures, e.g. `verify(address,bytes32)`.
    pub functions: Vec<String>,
    /// Canonical event signatures, e.g. `ProofVerified(address,bytes32)`.
    pub events: Vec<String>,
    /// Name to `0x` hex fingerprint (4-byte selector or 32-byte topic) for
    /// indicators whose signature text is not known.
    pub fingerprints: BTreeMap<String, String>,
    /// Case-insensitive keywords searched in source text.
    pub keywords: Vec<String>,
    /// Keep reports for contracts that matched nothing.
    pub include_non_matches: bool,
    /// Logging policy for malformed ABI entries.
    pub malformed_policy: MalformedPolicy,
}

impl ScanConfig {
    /// Parses a JSON configuration. Missing fields take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|err| ConfigError::InvalidJson(err.to_string()))
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Builds the fingerprint table: derived signatures first, then the
    /// precomputed hex fingerprints.
    pub fn indicator_table(&self) -> Result<IndicatorTable, ConfigError> {
        let mut table = IndicatorTable::new();
        for signature in &self.functions {
            table.insert_function(signature);
        }
        for signature in &self.events {
            table.insert_event(signature);
        }
        for (name, hex) in &self.fingerprints {
            table.insert_hex(name, hex)?;
        }
        Ok(table)
    }
}

/// Indicators of the UserProofHub presence-proof contracts (Zendity / Ava
/// Labs Teleporter integration).
pub static USERPROOFHUB: Lazy<ScanConfig> = Lazy::new(|| ScanConfig {
    functions: [
        "verify(address,bytes32)",
        "getUserProofHash(address)",
        "isUserVerified(address)",
        "transportProof(address,bytes32,string)",
    ]
    .into_iter()
    .map(String::from)
    .collect(),
    events: [
        "ProofVerified(address,bytes32)",
        "MessageSent(bytes32,address,bytes32,string)",
    ]
    .into_iter()
    .map(String::from)
    .collect(),
    fingerprints: BTreeMap::new(),
    keywords: [
        "userProofHashes",
        "ProofVerified",
        "ITeleporterMessenger",
        "sendCrossChainMessage",
        "TeleporterMessageInput",
        "TeleporterFeeInfo",
        "UserProofHub",
        "Zendity",
        "Ava Labs",
    ]
    .into_iter()
    .map(String::from)
    .collect(),
    include_non_matches: false,
    malformed_policy: MalformedPolicy::Warn,
});
