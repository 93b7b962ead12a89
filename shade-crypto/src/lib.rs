//! # Shade Crypto
//!
//! Cryptographic primitives for the Shade stealth address protocol:
//!
//! - **curve**: secp256k1 scalar/point operations over `k256`
//! - **hash**: Keccak-256, Ethereum address derivation, EIP-55 checksums
//! - **keypair**: key pair generation in all SEC1 encodings
//!
//! Everything here is deterministic given its inputs except the `generate_*`
//! entry points, which draw from the OS entropy source (or a caller-supplied
//! RNG in tests).

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod curve;
pub mod hash;
pub mod keypair;

pub use curve::{
    decode_point, encode_point, generate_secret_scalar, mul_generator, point_add, reduce_digest,
    scalar_add, scalar_from_secret, scalar_to_bytes, shared_x, to_public_key,
};
pub use hash::{
    address_from_uncompressed, addresses_equal, keccak256, parse_address, to_checksum_address,
};
pub use keypair::{eth_address, generate_keypair, keypair_from_secret};
