//! ABI metadata handling: decoding, canonical signatures and fingerprints.
//!
//! ABI entries come from untrusted explorer metadata. Decoding is lenient per
//! entry ([`parse_abi`]), canonicalisation is strict ([`canonical_type`]
//! reports tuples without a component list instead of rendering `()`), and
//! derivation ([`function_selector`], [`event_topic`]) is a pure function of
//! the entry name and its structural parameter types.

mod canonical;
mod derive;
mod error;
mod parse;
mod types;

pub use canonical::{canonical_params, canonical_signature, canonical_type, CanonicalSignature};
pub use derive::{
    event_topic, fingerprint, function_selector, selector_from_signature, topic_from_signature,
    Fingerprint, Selector, SELECTOR_SIZE,
};
pub use error::{AbiError, AbiResult};
pub use parse::{parse_abi, ParsedAbi, RejectedEntry};
pub use types::{AbiEntry, AbiParam, Components, EntryKind};
