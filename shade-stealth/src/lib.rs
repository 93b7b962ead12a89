//! # Shade Stealth
//!
//! The protocol engines of the Shade dual-key stealth address scheme:
//!
//! - **receiver**: dual-key (scan + spend) identity generation
//! - **derive**: sender-side stealth address derivation
//! - **reconstruct**: receiver-side key recovery and verification
//! - **scan**: batch processing of announcements
//!
//! The engines are pure functions over `shade-core` types; storage and I/O
//! live elsewhere.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod derive;
pub mod receiver;
pub mod reconstruct;
pub mod scan;

pub use derive::{
    derive_for_identity, derive_for_identity_with_ephemeral, derive_for_public_keys,
    derive_for_public_keys_with_ephemeral, tweak_from_digest, tweak_from_shared_x,
};
pub use receiver::{generate_receiver_identity, generate_receiver_identity_from};
pub use reconstruct::{reconstruct, Reconstruction};
pub use scan::{scan_announcements, ScanHit, ScanStats};
