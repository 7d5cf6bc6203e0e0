//! Keccak-256 fingerprinting of smart-contract ABIs.
//!
//! The crate re-derives 4-byte function selectors and 32-byte event topics
//! from ABI metadata and flags contracts whose ABI contains known
//! signatures. Layers, leaves first:
//!
//! * [`hash`] – a self-contained Keccak-256 (Ethereum padding, not NIST
//!   SHA3-256): the Keccak-f[1600] permutation and the 136/64 sponge.
//! * [`abi`] – ABI decoding, canonical `name(type,…)` signatures with nested
//!   tuples, and selector/topic derivation.
//! * [`indicators`] – byte-equality matching against a table of known
//!   fingerprints, plus the keyword check over source text.
//! * [`scan`] – per-contract reports over explorer `getsourcecode` records.
//! * [`config`] – scan configuration and built-in presets.
//!
//! ```
//! use abi_sigscan::abi::{function_selector, AbiEntry, AbiParam};
//!
//! let transfer = AbiEntry::function(
//!     "transfer",
//!     vec![AbiParam::new("address"), AbiParam::new("uint256")],
//! );
//! let selector = function_selector(&transfer).unwrap().unwrap();
//! assert_eq!(selector.to_string(), "0xa9059cbb");
//! ```
//!
//! Everything below [`scan`] is pure and synchronous; every hash call owns
//! its own state, so all functions may be called from any number of threads.

pub mod abi;
pub mod config;
pub mod hash;
pub mod indicators;
pub mod scan;
pub mod utils;

pub use abi::{
    canonical_signature, event_topic, function_selector, AbiEntry, AbiError, AbiParam,
    CanonicalSignature, EntryKind, Fingerprint, Selector,
};
pub use config::ScanConfig;
pub use hash::{keccak256, Digest};
pub use indicators::{match_indicators, IndicatorTable};
pub use scan::{ContractMetadata, IndicatorReport, Scanner};
