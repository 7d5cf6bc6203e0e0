//! Keccak-256 sponge: rate 136 bytes, capacity 64 bytes, Keccak padding.
//!
//! * Full 136-byte blocks are XORed into the first 17 lanes (little-endian)
//!   and followed by one permutation call.
//! * The trailing 0–135 bytes are framed as `data || 0x01 || 0x00*`, with
//!   `0x80` ORed into byte 135. An input whose length is a multiple of the
//!   rate (the empty input included) therefore absorbs one extra block made
//!   of padding only.
//! * The digest is the first 32 bytes of the state after the last
//!   permutation; 32 bytes fit in the rate so no further squeezing is needed.

use super::constants::{DIGEST_SIZE, PAD_HEAD, PAD_TAIL, RATE_BYTES, RATE_LANES, STATE_LANES};
use super::digest::Digest;
use super::permutation::{keccak_f, State};

/// Computes the Keccak-256 digest of `input`.
///
/// Total over every byte string. The state lives on this call's stack and is
/// dropped when the digest has been read.
pub fn keccak256(input: &[u8]) -> Digest {
    let mut state: State = [0u64; STATE_LANES];

    let mut blocks = input.chunks_exact(RATE_BYTES);
    for block in &mut blocks {
        absorb_block(&mut state, block);
        keccak_f(&mut state);
    }

    let final_block = pad_final_block(blocks.remainder());
    absorb_block(&mut state, &final_block);
    keccak_f(&mut state);

    squeeze(&state)
}

/// Builds the padded last block from the `0..RATE_BYTES` trailing bytes.
pub(crate) fn pad_final_block(remainder: &[u8]) -> [u8; RATE_BYTES] {
    debug_assert!(remainder.len() < RATE_BYTES);
    let mut block = [0u8; RATE_BYTES];
    block[..remainder.len()].copy_from_slice(remainder);
    block[remainder.len()] = PAD_HEAD;
    block[RATE_BYTES - 1] |= PAD_TAIL;
    block
}

/// XORs one rate-sized block into lanes `0..17`.
pub(crate) fn absorb_block(state: &mut State, block: &[u8]) {
    debug_assert_eq!(block.len(), RATE_BYTES);
    for (lane, word) in state
        .iter_mut()
        .take(RATE_LANES)
        .zip(block.chunks_exact(8))
    {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(word);
        *lane ^= u64::from_le_bytes(bytes);
    }
}

/// Reads the first 32 bytes of the rate, lanes little-endian.
pub(crate) fn squeeze(state: &State) -> Digest {
    let mut out = [0u8; DIGEST_SIZE];
    for (chunk, lane) in out.chunks_exact_mut(8).zip(state.iter()) {
        chunk.copy_from_slice(&lane.to_le_bytes());
    }
    Digest::from_bytes(out)
}
