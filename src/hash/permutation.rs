//! Keccak-f[1600] permutation over a 5×5 matrix of 64-bit lanes.
//!
//! Lanes are addressed by `(x, y)` with linear index `x + 5y`. Each round runs
//! theta, rho+pi, chi and iota in that order. The permutation is a bijection
//! on the 1600-bit state and has no failure modes.

use super::constants::{KECCAK_ROUNDS, ROTATION_OFFSETS, ROUND_CONSTANTS, STATE_LANES};

/// Permutation state: 25 lanes, `state[x + 5 * y]`.
pub type State = [u64; STATE_LANES];

#[inline(always)]
const fn lane(x: usize, y: usize) -> usize {
    x + 5 * y
}

/// Applies all 24 rounds of Keccak-f[1600] to `state` in place.
pub fn keccak_f(state: &mut State) {
    for rc in ROUND_CONSTANTS.iter().take(KECCAK_ROUNDS) {
        round(state, *rc);
    }
}

/// Applies a single round parameterised by the round constant `rc`.
pub fn round(state: &mut State, rc: u64) {
    theta(state);
    let b = rho_pi(state);
    chi(state, &b);
    iota(state, rc);
}

/// Column-parity diffusion.
pub fn theta(state: &mut State) {
    let mut c = [0u64; 5];
    for (x, parity) in c.iter_mut().enumerate() {
        *parity = state[lane(x, 0)]
            ^ state[lane(x, 1)]
            ^ state[lane(x, 2)]
            ^ state[lane(x, 3)]
            ^ state[lane(x, 4)];
    }

    for x in 0..5 {
        let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
        for y in 0..5 {
            state[lane(x, y)] ^= d;
        }
    }
}

/// Rotates every lane by its fixed offset and moves `(x, y)` to
/// `(y, 2x + 3y mod 5)`. Returns the relocated lanes.
pub fn rho_pi(state: &State) -> State {
    let mut b = [0u64; STATE_LANES];
    for x in 0..5 {
        for y in 0..5 {
            let target = lane(y, (2 * x + 3 * y) % 5);
            b[target] = state[lane(x, y)].rotate_left(ROTATION_OFFSETS[x][y]);
        }
    }
    b
}

/// Non-linear row mixing computed from the rho+pi output `b`.
pub fn chi(state: &mut State, b: &State) {
    for y in 0..5 {
        for x in 0..5 {
            state[lane(x, y)] =
                b[lane(x, y)] ^ (!b[lane((x + 1) % 5, y)] & b[lane((x + 2) % 5, y)]);
        }
    }
}

/// Injects the round constant into lane `(0, 0)`.
#[inline(always)]
pub fn iota(state: &mut State, rc: u64) {
    state[0] ^= rc;
}
