use core::fmt;
use std::collections::{BTreeMap, HashMap};

use crate::abi::{selector_from_signature, topic_from_signature, Fingerprint, Selector};
use crate::hash::digest::decode_prefixed_hex;
use crate::hash::{Digest, DIGEST_SIZE};

/// Errors raised while populating an [`IndicatorTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndicatorError {
    /// Expected value was neither a 4-byte selector nor a 32-byte topic.
    InvalidLength {
        /// Indicator name.
        name: String,
        /// Number of bytes supplied.
        len: usize,
    },
    /// Expected value was not valid hexadecimal.
    InvalidHex {
        /// Indicator name.
        name: String,
        /// Decoder message.
        reason: String,
    },
}

impl fmt::Display for IndicatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorError::InvalidLength { name, len } => write!(
                f,
                "indicator `{name}` has {len} bytes, expected 4 (selector) or 32 (topic)"
            ),
            IndicatorError::InvalidHex { name, reason } => {
                write!(f, "indicator `{name}` is not valid hex: {reason}")
            }
        }
    }
}

impl std::error::Error for IndicatorError {}

/// Known fingerprints keyed by value, each mapped to the indicator names that
/// expect it.
///
/// Lookups compare fingerprint bytes; the names are labels only and never
/// take part in matching.
#[derive(Debug, Clone, Default)]
pub struct IndicatorTable {
    by_fingerprint: HashMap<Fingerprint, Vec<String>>,
    len: usize,
}

impl IndicatorTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from name → raw expected bytes.
    pub fn from_bytes_map(expected: &BTreeMap<String, Vec<u8>>) -> Result<Self, IndicatorError> {
        let mut table = Self::new();
        for (name, bytes) in expected {
            table.insert_bytes(name, bytes)?;
        }
        Ok(table)
    }

    /// Registers `name` under an explicit fingerprint.
    pub fn insert(&mut self, name: impl Into<String>, fingerprint: Fingerprint) {
        let name = name.into();
        let names = self.by_fingerprint.entry(fingerprint).or_default();
        if !names.contains(&name) {
            names.push(name);
            self.len += 1;
        }
    }

    /// Registers raw bytes: 4 bytes are a selector, 32 bytes a topic.
    pub fn insert_bytes(&mut self, name: &str, bytes: &[u8]) -> Result<(), IndicatorError> {
        let fingerprint = match bytes.len() {
            4 => Fingerprint::Selector(Selector::from_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3],
            ])),
            DIGEST_SIZE => {
                let mut digest = [0u8; DIGEST_SIZE];
                digest.copy_from_slice(bytes);
                Fingerprint::Topic(Digest::from_bytes(digest))
            }
            len => {
                return Err(IndicatorError::InvalidLength {
                    name: name.to_string(),
                    len,
                })
            }
        };
        self.insert(name, fingerprint);
        Ok(())
    }

    /// Registers a `0x`-prefixed or bare hex fingerprint.
    pub fn insert_hex(&mut self, name: &str, hex: &str) -> Result<(), IndicatorError> {
        let bytes = decode_prefixed_hex(hex).map_err(|err| IndicatorError::InvalidHex {
            name: name.to_string(),
            reason: err.to_string(),
        })?;
        self.insert_bytes(name, &bytes)
    }

    /// Registers a canonical function signature under its own text.
    pub fn insert_function(&mut self, signature: &str) {
        self.insert(
            signature,
            Fingerprint::Selector(selector_from_signature(signature)),
        );
    }

    /// Registers a canonical event signature under its own text.
    pub fn insert_event(&mut self, signature: &str) {
        self.insert(signature, Fingerprint::Topic(topic_from_signature(signature)));
    }

    /// Names registered for `fingerprint`; empty when unknown.
    pub fn lookup(&self, fingerprint: &Fingerprint) -> &[String] {
        self.by_fingerprint
            .get(fingerprint)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of registered indicator names.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates over `(name, fingerprint)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Fingerprint)> {
        self.by_fingerprint
            .iter()
            .flat_map(|(fp, names)| names.iter().map(move |name| (name.as_str(), fp)))
    }
}
