use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::constants::DIGEST_SIZE;

/// Error surfaced when a digest cannot be decoded from its textual form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigestParseError {
    /// The input was not valid hexadecimal.
    InvalidHex(String),
    /// The decoded payload did not have the expected number of bytes.
    InvalidLength {
        /// Length expected by the conversion routine.
        expected: usize,
        /// Length that was decoded.
        got: usize,
    },
}

impl fmt::Display for DigestParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestParseError::InvalidHex(reason) => write!(f, "invalid hex digest: {reason}"),
            DigestParseError::InvalidLength { expected, got } => {
                write!(f, "expected {expected} digest bytes, got {got}")
            }
        }
    }
}

impl std::error::Error for DigestParseError {}

/// Decodes an optionally `0x`-prefixed hex string into raw bytes.
pub(crate) fn decode_prefixed_hex(input: &str) -> Result<Vec<u8>, DigestParseError> {
    let trimmed = input.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(body).map_err(|err| DigestParseError::InvalidHex(err.to_string()))
}

/// Keccak-256 output. Immutable once produced.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Digest {
    bytes: [u8; DIGEST_SIZE],
}

impl Digest {
    /// Constructs a digest from raw bytes.
    pub const fn from_bytes(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the raw digest bytes.
    pub const fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.bytes
    }

    /// Consumes the digest and returns the underlying byte array.
    pub const fn into_bytes(self) -> [u8; DIGEST_SIZE] {
        self.bytes
    }

    /// Returns a helper that formats the digest as lowercase hexadecimal
    /// without a prefix.
    pub fn to_hex(&self) -> HexOutput<'_> {
        HexOutput(&self.bytes)
    }

    /// Parses a 32-byte digest from `0x`-prefixed or bare hex.
    pub fn from_hex(input: &str) -> Result<Self, DigestParseError> {
        let decoded = decode_prefixed_hex(input)?;
        let bytes: [u8; DIGEST_SIZE] =
            decoded
                .as_slice()
                .try_into()
                .map_err(|_| DigestParseError::InvalidLength {
                    expected: DIGEST_SIZE,
                    got: decoded.len(),
                })?;
        Ok(Self::from_bytes(bytes))
    }
}

impl From<[u8; DIGEST_SIZE]> for Digest {
    fn from(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Digest> for [u8; DIGEST_SIZE] {
    fn from(digest: Digest) -> Self {
        digest.into_bytes()
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl FromStr for Digest {
    type Err = DigestParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Renders as `0x` followed by 64 lowercase hex characters.
impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest(0x{})", self.to_hex())
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Digest::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

/// Lowercase hexadecimal view over a byte slice.
#[derive(Clone, Copy)]
pub struct HexOutput<'a>(pub(crate) &'a [u8]);

impl fmt::Display for HexOutput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for HexOutput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
