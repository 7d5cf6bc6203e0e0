//! Selector and topic derivation.
//!
//! A function selector is the first four bytes of `keccak256(signature)`; an
//! event topic is the whole digest. Both depend on nothing but the canonical
//! signature text, so structurally identical entries always agree.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::hash::digest::{decode_prefixed_hex, DigestParseError};
use crate::hash::{keccak256, Digest, HexOutput};

use super::canonical::canonical_signature;
use super::error::AbiResult;
use super::types::{AbiEntry, EntryKind};

/// Number of bytes in a function selector.
pub const SELECTOR_SIZE: usize = 4;

/// Four-byte function selector.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Selector([u8; SELECTOR_SIZE]);

impl Selector {
    /// Constructs a selector from raw bytes.
    pub const fn from_bytes(bytes: [u8; SELECTOR_SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns the raw selector bytes.
    pub const fn as_bytes(&self) -> &[u8; SELECTOR_SIZE] {
        &self.0
    }

    /// Takes the leading four bytes of a digest.
    pub fn from_digest(digest: &Digest) -> Self {
        let bytes = digest.as_bytes();
        Self([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    /// Lowercase hex without prefix.
    pub fn to_hex(&self) -> HexOutput<'_> {
        HexOutput(&self.0)
    }

    /// Parses a selector from `0x`-prefixed or bare hex.
    pub fn from_hex(input: &str) -> Result<Self, DigestParseError> {
        let decoded = decode_prefixed_hex(input)?;
        let bytes: [u8; SELECTOR_SIZE] =
            decoded
                .as_slice()
                .try_into()
                .map_err(|_| DigestParseError::InvalidLength {
                    expected: SELECTOR_SIZE,
                    got: decoded.len(),
                })?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Selector(0x{})", self.to_hex())
    }
}

impl FromStr for Selector {
    type Err = DigestParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Selector::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

/// Fingerprint of an ABI entry: a selector for functions, a topic for events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Fingerprint {
    /// Function selector.
    Selector(Selector),
    /// Event topic.
    Topic(Digest),
}

impl Fingerprint {
    /// Raw fingerprint bytes (4 or 32).
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Fingerprint::Selector(selector) => selector.as_bytes(),
            Fingerprint::Topic(topic) => topic.as_bytes(),
        }
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fingerprint::Selector(selector) => fmt::Display::fmt(selector, f),
            Fingerprint::Topic(topic) => fmt::Display::fmt(topic, f),
        }
    }
}

/// Selector of already-canonical signature text.
pub fn selector_from_signature(signature: &str) -> Selector {
    Selector::from_digest(&keccak256(signature.as_bytes()))
}

/// Topic of already-canonical signature text.
pub fn topic_from_signature(signature: &str) -> Digest {
    keccak256(signature.as_bytes())
}

/// Function selector of `entry`; `Ok(None)` for anything but a named function.
pub fn function_selector(entry: &AbiEntry) -> AbiResult<Option<Selector>> {
    if entry.kind != EntryKind::Function {
        return Ok(None);
    }
    Ok(canonical_signature(entry)?.map(|sig| selector_from_signature(sig.as_str())))
}

/// Event topic of `entry`; `Ok(None)` for anything but a named event.
pub fn event_topic(entry: &AbiEntry) -> AbiResult<Option<Digest>> {
    if entry.kind != EntryKind::Event {
        return Ok(None);
    }
    Ok(canonical_signature(entry)?.map(|sig| topic_from_signature(sig.as_str())))
}

/// Selector or topic depending on the entry kind.
pub fn fingerprint(entry: &AbiEntry) -> AbiResult<Option<Fingerprint>> {
    match entry.kind {
        EntryKind::Function => Ok(function_selector(entry)?.map(Fingerprint::Selector)),
        EntryKind::Event => Ok(event_topic(entry)?.map(Fingerprint::Topic)),
        _ => Ok(None),
    }
}
