//! Protocol constants for Shade.
//!
//! All sizes follow SEC1 encodings over secp256k1 and Ethereum address
//! conventions. These match the wire format of the JSON records exchanged
//! between sender and receiver.

// ═══════════════════════════════════════════════════════════════════════════════
// SECP256K1 SIZES (SEC1)
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of a secp256k1 private key scalar in bytes.
pub const SECRET_KEY_SIZE: usize = 32;

/// Size of an uncompressed SEC1 point encoding: 0x04 || X || Y.
pub const UNCOMPRESSED_POINT_SIZE: usize = 65;

/// Size of a compressed SEC1 point encoding: 0x02/0x03 || X.
pub const COMPRESSED_POINT_SIZE: usize = 33;

/// Size of a single affine coordinate in bytes.
pub const COORDINATE_SIZE: usize = 32;

/// Leading tag byte of an uncompressed SEC1 encoding.
pub const SEC1_UNCOMPRESSED_TAG: u8 = 0x04;

/// Leading tag bytes of a compressed SEC1 encoding (even / odd Y).
pub const SEC1_COMPRESSED_TAG_EVEN: u8 = 0x02;
/// See [`SEC1_COMPRESSED_TAG_EVEN`].
pub const SEC1_COMPRESSED_TAG_ODD: u8 = 0x03;

// ═══════════════════════════════════════════════════════════════════════════════
// ETHEREUM CONSTANTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of an Ethereum address in bytes (20 bytes = 160 bits).
pub const ETH_ADDRESS_SIZE: usize = 20;

/// Size of a Keccak-256 digest.
pub const KECCAK256_SIZE: usize = 32;

/// Length of a `0x`-prefixed checksummed address string.
pub const ETH_ADDRESS_STR_LEN: usize = 2 + ETH_ADDRESS_SIZE * 2;

// ═══════════════════════════════════════════════════════════════════════════════
// ANNOUNCEMENT LAYOUT
// ═══════════════════════════════════════════════════════════════════════════════

/// The encrypted payload always begins with the ephemeral uncompressed
/// public key; auxiliary bytes follow.
pub const PAYLOAD_EPHEMERAL_PREFIX_SIZE: usize = UNCOMPRESSED_POINT_SIZE;

/// Auxiliary payload used by the reference flow when the caller supplies none.
pub const DEFAULT_AUX_PAYLOAD: &[u8] = b"hello receiver";

// ═══════════════════════════════════════════════════════════════════════════════
// RECORD KEYS
// ═══════════════════════════════════════════════════════════════════════════════

/// Storage key under which the receiver identity record is persisted.
pub const RECEIVER_RECORD_KEY: &str = "receiver";

/// Storage key under which the latest announcement record is persisted.
pub const ANNOUNCEMENT_RECORD_KEY: &str = "announcement";
