//! Sender-side stealth derivation.
//!
//! Given the receiver's scan and spend public keys, the sender:
//!
//! 1. draws a fresh ephemeral key pair
//! 2. computes the shared secret `S = eph_priv · scan_pub` and takes `S.x`
//! 3. derives `tweak = keccak256(S.x) mod n` (a zero reduction becomes
//!    scalar 1, so derivation is total and deterministic)
//! 4. computes `stealth_pub = spend_pub + tweak · G`
//! 5. derives the EIP-55 stealth address from `stealth_pub`
//!
//! Only the receiver's *scan* key enters the shared secret, so the scan
//! private key alone can detect payments while the spend private key alone
//! can claim them.
//!
//! [`derive_for_identity`] is the self-check mode: it has the whole receiver
//! record, so it also computes `stealth_priv = spend_priv + tweak` and keeps
//! the ephemeral private key in the announcement. [`derive_for_public_keys`]
//! is the production shape: it knows only public keys and emits no secret
//! fields.

use k256::elliptic_curve::Field;
use k256::{NonZeroScalar, ProjectivePoint, PublicKey, Scalar};
use tracing::debug;

use shade_core::error::{Result, ShadeError};
use shade_core::types::{
    Announcement, Coordinate, ReceiverIdentity, SecretKeyBytes, UncompressedPoint,
};
use shade_crypto::{curve, hash};

/// Derives the stealth tweak from a shared X coordinate.
pub fn tweak_from_shared_x(shared_x: &[u8; 32]) -> Scalar {
    tweak_from_digest(hash::keccak256(shared_x))
}

/// Reduces a digest to the tweak scalar, substituting 1 for a zero result.
///
/// A random digest reduces to zero with probability ~2^-128; substituting a
/// fixed non-zero scalar keeps both sides of the protocol in agreement
/// without retries.
pub fn tweak_from_digest(digest: [u8; 32]) -> Scalar {
    let tweak = curve::reduce_digest(digest);
    if bool::from(tweak.is_zero()) {
        Scalar::ONE
    } else {
        tweak
    }
}

/// Derives an announcement in reference (self-check) mode.
///
/// The announcement carries `ephemeralPrivKey` and `stealthPriv` so the
/// receiver-side reconstruction can be verified end to end. Never publish
/// this shape; use [`Announcement::for_broadcast`] or
/// [`derive_for_public_keys`].
pub fn derive_for_identity(identity: &ReceiverIdentity, aux: &[u8]) -> Result<Announcement> {
    derive_for_identity_with_ephemeral(identity, &curve::generate_secret_scalar()?, aux)
}

/// Reference-mode derivation with a caller-supplied ephemeral scalar.
pub fn derive_for_identity_with_ephemeral(
    identity: &ReceiverIdentity,
    ephemeral: &NonZeroScalar,
    aux: &[u8],
) -> Result<Announcement> {
    identity.validate()?;
    let scan_pub = decode_receiver_key(&identity.scan.public_key_uncompressed, "scan")?;
    let spend_pub = decode_receiver_key(&identity.spend.public_key_uncompressed, "spend")?;
    let spend_priv = *curve::scalar_from_secret(&identity.spend.private_key)?;
    derive_inner(&scan_pub, &spend_pub, Some(&spend_priv), ephemeral, aux)
}

/// Derives an announcement in production shape: public keys in, no secret
/// fields out.
pub fn derive_for_public_keys(
    scan_pub: &UncompressedPoint,
    spend_pub: &UncompressedPoint,
    aux: &[u8],
) -> Result<Announcement> {
    derive_for_public_keys_with_ephemeral(scan_pub, spend_pub, &curve::generate_secret_scalar()?, aux)
}

/// Production-shape derivation with a caller-supplied ephemeral scalar.
pub fn derive_for_public_keys_with_ephemeral(
    scan_pub: &UncompressedPoint,
    spend_pub: &UncompressedPoint,
    ephemeral: &NonZeroScalar,
    aux: &[u8],
) -> Result<Announcement> {
    let scan = decode_receiver_key(scan_pub, "scan")?;
    let spend = decode_receiver_key(spend_pub, "spend")?;
    let announcement = derive_inner(&scan, &spend, None, ephemeral, aux)?;
    Ok(announcement.for_broadcast())
}

fn decode_receiver_key(point: &UncompressedPoint, role: &str) -> Result<PublicKey> {
    curve::decode_point(point.as_bytes())
        .map_err(|e| ShadeError::InvalidReceiverKey(format!("{role} public key: {e}")))
}

fn derive_inner(
    scan_pub: &PublicKey,
    spend_pub: &PublicKey,
    spend_priv: Option<&Scalar>,
    ephemeral: &NonZeroScalar,
    aux: &[u8],
) -> Result<Announcement> {
    let ephemeral_pub = PublicKey::from_secret_scalar(ephemeral);
    let ephemeral_bytes = curve::encode_point(&ephemeral_pub, false);

    let shared = curve::shared_x(ephemeral, scan_pub)?;
    let tweak = tweak_from_shared_x(&shared);

    let stealth_point = curve::point_add(
        &ProjectivePoint::from(*spend_pub.as_affine()),
        &curve::mul_generator(&tweak),
    );
    let stealth_pub = curve::to_public_key(&stealth_point).map_err(|_| {
        ShadeError::Validation("spend key and tweak cancel to the point at infinity".into())
    })?;
    let stealth_bytes = curve::encode_point(&stealth_pub, false);
    let stealth_address =
        hash::to_checksum_address(&hash::address_from_uncompressed(&stealth_bytes)?);

    let stealth_priv = spend_priv.map(|sp| {
        SecretKeyBytes::from_array(curve::scalar_to_bytes(&curve::scalar_add(sp, &tweak)))
    });

    let mut payload = ephemeral_bytes.clone();
    payload.extend_from_slice(aux);

    debug!(stealth_address = %stealth_address, aux_len = aux.len(), "derived stealth announcement");

    Ok(Announcement {
        ephemeral_priv_key: Some(SecretKeyBytes::from_array(curve::scalar_to_bytes(ephemeral))),
        ephemeral_pub_hash: Coordinate::from_array(hash::keccak256(&ephemeral_bytes)),
        ephemeral_pub_uncompressed: UncompressedPoint::from_bytes(&ephemeral_bytes)?,
        encrypted_payload: payload,
        stealth_priv,
        stealth_pub_uncompressed: UncompressedPoint::from_bytes(&stealth_bytes)?,
        stealth_address,
    })
}
