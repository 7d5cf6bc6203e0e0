use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Verified-contract record as returned by Etherscan-compatible
/// `getsourcecode` endpoints. Field names follow the explorer response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractMetadata {
    /// Network label supplied by the caller (not part of explorer output).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    /// Contract address supplied by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Raw source field: Solidity text or a standard-JSON input document.
    #[serde(rename = "SourceCode", default)]
    pub source_code: String,
    /// ABI JSON text, or the explorer's "not verified" sentinel.
    #[serde(rename = "ABI", default)]
    pub abi: String,
    /// Contract name reported by the explorer.
    #[serde(rename = "ContractName", default)]
    pub contract_name: String,
    /// Compiler version string.
    #[serde(rename = "CompilerVersion", default)]
    pub compiler_version: Option<String>,
    /// `"1"` when the explorer detected a proxy.
    #[serde(rename = "Proxy", default)]
    pub proxy: Option<String>,
    /// Implementation address behind a proxy.
    #[serde(rename = "Implementation", default)]
    pub implementation: Option<String>,
    /// Last verification timestamp, when the explorer provides one.
    #[serde(rename = "LastVerified", default)]
    pub last_verified: Option<String>,
}

/// Splits the explorer `SourceCode` field into individual source texts.
///
/// Multi-file contracts arrive as a standard-JSON input wrapped in an extra
/// pair of braces (`{{ … }}`); their `sources.*.content` strings are
/// returned. A JSON object with a `source` string yields that string.
/// Anything else, including plain Solidity, is returned as a single source.
pub fn normalize_sources(source: &str) -> Vec<String> {
    let mut source = source.trim();
    if source.is_empty() {
        return Vec::new();
    }
    if source.len() >= 4 && source.starts_with("{{") && source.ends_with("}}") {
        source = &source[1..source.len() - 1];
    }

    let Ok(Value::Object(parsed)) = serde_json::from_str::<Value>(source) else {
        return vec![source.to_string()];
    };
    if let Some(Value::Object(files)) = parsed.get("sources") {
        return files
            .values()
            .filter_map(|file| file.get("content").and_then(Value::as_str))
            .map(str::to_string)
            .collect();
    }
    if let Some(Value::String(text)) = parsed.get("source") {
        return vec![text.clone()];
    }
    vec![source.to_string()]
}
