//! Fixed parameters of the Keccak-256 configuration used for ABI fingerprints.
//! All tables are compile-time constants; nothing here is mutated at runtime.

/// Number of rounds applied by a single Keccak-f[1600] invocation.
pub const KECCAK_ROUNDS: usize = 24;

/// Number of 64-bit lanes in the permutation state.
pub const STATE_LANES: usize = 25;

/// Width of the permutation state in bytes (1600 bits).
pub const STATE_BYTES: usize = 200;

/// Bytes exposed to absorption and squeezing (1088 bits).
pub const RATE_BYTES: usize = 136;

/// Hidden bytes of the state (512 bits).
pub const CAPACITY_BYTES: usize = 64;

/// Lanes covered by the rate portion of the state.
pub const RATE_LANES: usize = RATE_BYTES / 8;

/// Size of the Keccak-256 digest in bytes.
pub const DIGEST_SIZE: usize = 32;

/// Byte appended directly after the message in the final block.
///
/// Keccak (and Ethereum) use `0x01`; NIST SHA3-256 uses `0x06` and yields a
/// different function.
pub const PAD_HEAD: u8 = 0x01;

/// Bit ORed into the last byte of the final block.
pub const PAD_TAIL: u8 = 0x80;

const _: () = assert!(RATE_BYTES + CAPACITY_BYTES == STATE_BYTES);
const _: () = assert!(STATE_LANES * 8 == STATE_BYTES);
const _: () = assert!(DIGEST_SIZE <= RATE_BYTES);

/// Iota round constants, one per round.
pub const ROUND_CONSTANTS: [u64; KECCAK_ROUNDS] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_8082,
    0x8000_0000_0000_808a,
    0x8000_0000_8000_8000,
    0x0000_0000_0000_808b,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8009,
    0x0000_0000_0000_008a,
    0x0000_0000_0000_0088,
    0x0000_0000_8000_8009,
    0x0000_0000_8000_000a,
    0x0000_0000_8000_808b,
    0x8000_0000_0000_008b,
    0x8000_0000_0000_8089,
    0x8000_0000_0000_8003,
    0x8000_0000_0000_8002,
    0x8000_0000_0000_0080,
    0x0000_0000_0000_800a,
    0x8000_0000_8000_000a,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8080,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8008,
];

/// Rho rotation amounts indexed as `ROTATION_OFFSETS[x][y]`.
pub const ROTATION_OFFSETS: [[u32; 5]; 5] = [
    [0, 36, 3, 41, 18],
    [1, 44, 10, 45, 2],
    [62, 6, 43, 15, 61],
    [28, 55, 25, 21, 56],
    [27, 20, 39, 8, 14],
];
