//! Announcement record published by a sender per transaction.
//!
//! An announcement is conceptually single-use: one ephemeral key pair and
//! one stealth address. The only receiver-directed secret channel is the
//! ephemeral public key, from which the receiver derives the same tweak the
//! sender used.
//!
//! `ephemeralPrivKey` and `stealthPriv` exist only in the reference
//! self-check flow. A real sender cannot know the receiver's spend private
//! key, so a broadcast announcement must not carry either field; use
//! [`Announcement::for_broadcast`] before publishing.

use serde::{Deserialize, Serialize};

use crate::constants::PAYLOAD_EPHEMERAL_PREFIX_SIZE;
use crate::error::{Result, ShadeError};
use crate::types::identity::validate_address_string;
use crate::types::keys::{Coordinate, SecretKeyBytes, UncompressedPoint};

/// An announcement record, as persisted and exchanged.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    /// Ephemeral private scalar (reference flow only; absent on broadcast)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ephemeral_priv_key: Option<SecretKeyBytes>,
    /// Ephemeral public key, uncompressed
    pub ephemeral_pub_uncompressed: UncompressedPoint,
    /// Keccak-256 of the ephemeral uncompressed public key
    pub ephemeral_pub_hash: Coordinate,
    /// Payload: ephemeral uncompressed public key || auxiliary bytes.
    /// Encryption of the auxiliary bytes is an external concern.
    #[serde(with = "crate::encoding::serde_vec")]
    pub encrypted_payload: Vec<u8>,
    /// Stealth private scalar (reference flow only; absent on broadcast)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stealth_priv: Option<SecretKeyBytes>,
    /// Stealth public key, uncompressed
    pub stealth_pub_uncompressed: UncompressedPoint,
    /// EIP-55 checksummed stealth address
    pub stealth_address: String,
}

impl Announcement {
    /// Validates the structural invariants of the record.
    ///
    /// The cryptographic binding (tweak relation, hash correctness) is
    /// checked by the reconstruction engine, not here.
    pub fn validate(&self) -> Result<()> {
        if self.encrypted_payload.len() < PAYLOAD_EPHEMERAL_PREFIX_SIZE {
            return Err(ShadeError::InvalidAnnouncement(format!(
                "payload too short: {} bytes, needs at least {}",
                self.encrypted_payload.len(),
                PAYLOAD_EPHEMERAL_PREFIX_SIZE
            )));
        }
        if self.encrypted_payload[..PAYLOAD_EPHEMERAL_PREFIX_SIZE]
            != *self.ephemeral_pub_uncompressed.as_bytes()
        {
            return Err(ShadeError::InvalidAnnouncement(
                "payload does not begin with the ephemeral public key".into(),
            ));
        }
        validate_address_string(&self.stealth_address)
            .map_err(|_| ShadeError::InvalidAnnouncement("malformed stealth address".into()))?;
        Ok(())
    }

    /// Returns the auxiliary bytes that follow the ephemeral key prefix
    /// (empty if the payload is shorter than the prefix).
    pub fn aux_bytes(&self) -> &[u8] {
        self.encrypted_payload
            .get(PAYLOAD_EPHEMERAL_PREFIX_SIZE..)
            .unwrap_or(&[])
    }

    /// Returns a copy with all secret fields withheld, the shape a real
    /// deployment publishes.
    pub fn for_broadcast(&self) -> Self {
        let mut out = self.clone();
        out.ephemeral_priv_key = None;
        out.stealth_priv = None;
        out
    }
}
