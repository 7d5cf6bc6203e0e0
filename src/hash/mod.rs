//! Keccak-256 hash engine used to fingerprint ABI signatures.
//!
//! The engine is split the same way the construction is usually described:
//!
//! * [`permutation`] – the Keccak-f[1600] round function over 25 lanes.
//! * [`sponge`] – rate/capacity framing, Keccak `0x01 … 0x80` padding and
//!   the 32-byte squeeze.
//! * [`constants`] – round constants, rotation offsets and geometry.
//! * [`digest`] – the [`Digest`] value type and its hex rendering.
//!
//! Only the one-shot [`keccak256`] entry point is exposed; ABI signatures are
//! short strings and never need incremental hashing.

pub mod constants;
pub mod digest;
pub mod permutation;
pub mod sponge;


pub use constants::{CAPACITY_BYTES, DIGEST_SIZE, KECCAK_ROUNDS, RATE_BYTES, STATE_BYTES};
pub use digest::{Digest, DigestParseError, HexOutput};
pub use permutation::{keccak_f, State};
pub use sponge::keccak256;
