//! Receiver-side reconstruction.
//!
//! The receiver mirrors the sender's derivation using only its own private
//! keys and the public parts of an announcement:
//!
//! `scan_priv · eph_pub` has the same X coordinate as `eph_priv · scan_pub`,
//! so both sides reduce the same digest to the same tweak. Adding the tweak
//! to the spend private key yields the one scalar that controls the
//! announced stealth address.

use k256::NonZeroScalar;
use tracing::debug;

use shade_core::error::{Result, ShadeError};
use shade_core::types::{Announcement, KeyPair, SecretKeyBytes};
use shade_crypto::{curve, hash, keypair};

use crate::derive::tweak_from_shared_x;

/// Outcome of reconstructing one announcement.
///
/// `matches == false` is ordinary data: the announcement was simply meant
/// for someone else (or was tampered with). Only malformed input errors.
#[derive(Clone, Debug)]
pub struct Reconstruction {
    /// The stealth key pair under the receiver's control.
    pub key_pair: KeyPair,
    /// EIP-55 address derived from the reconstructed key.
    pub stealth_address: String,
    /// Whether the derived address equals the announced one.
    pub matches: bool,
}

/// Reconstructs the stealth key for an announcement.
///
/// # Errors
/// - `InvalidAnnouncement` for structural defects or an ephemeral key that
///   does not decode to a curve point, or whose hash does not match
/// - `Validation` for out-of-range private keys or a spend/tweak sum of zero
pub fn reconstruct(
    scan_priv: &SecretKeyBytes,
    spend_priv: &SecretKeyBytes,
    announcement: &Announcement,
) -> Result<Reconstruction> {
    announcement.validate()?;

    let scan = curve::scalar_from_secret(scan_priv)?;
    let spend = curve::scalar_from_secret(spend_priv)?;

    let ephemeral_bytes = announcement.ephemeral_pub_uncompressed.as_bytes();
    let ephemeral_pub = curve::decode_point(ephemeral_bytes)
        .map_err(|e| ShadeError::InvalidAnnouncement(format!("ephemeral key: {e}")))?;
    if hash::keccak256(ephemeral_bytes) != *announcement.ephemeral_pub_hash.as_array() {
        return Err(ShadeError::InvalidAnnouncement(
            "ephemeral key hash does not match the announcement".into(),
        ));
    }

    let shared = curve::shared_x(&scan, &ephemeral_pub)?;
    let tweak = tweak_from_shared_x(&shared);

    let stealth_scalar = curve::scalar_add(&spend, &tweak);
    let stealth = Option::<NonZeroScalar>::from(NonZeroScalar::new(stealth_scalar)).ok_or_else(
        || ShadeError::Validation("spend key and tweak cancel to the zero scalar".into()),
    )?;

    let key_pair = keypair::keypair_from_scalar(&stealth)?;
    let stealth_address = keypair::eth_address(&key_pair)?;
    let matches = hash::addresses_equal(&stealth_address, &announcement.stealth_address);

    debug!(matches, announced = %announcement.stealth_address, "reconstructed announcement");

    Ok(Reconstruction {
        key_pair,
        stealth_address,
        matches,
    })
}
