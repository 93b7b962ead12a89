//! Key pair generation and encoding.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{NonZeroScalar, PublicKey};

use shade_core::constants::{COMPRESSED_POINT_SIZE, UNCOMPRESSED_POINT_SIZE};
use shade_core::error::{Result, ShadeError};
use shade_core::types::{CompressedPoint, KeyPair, SecretKeyBytes, UncompressedPoint};

use crate::curve;

/// Generates a fresh key pair from the OS entropy source.
pub fn generate_keypair() -> Result<KeyPair> {
    keypair_from_scalar(&curve::generate_secret_scalar()?)
}

/// Generates a key pair from the given RNG. Used by deterministic tests.
pub fn generate_keypair_from(rng: &mut impl rand::RngCore) -> Result<KeyPair> {
    keypair_from_scalar(&curve::generate_secret_scalar_from(rng)?)
}

/// Builds the full key record for an existing secret.
///
/// # Errors
/// Returns `Validation` if the bytes are not a canonical non-zero scalar.
pub fn keypair_from_secret(secret: &SecretKeyBytes) -> Result<KeyPair> {
    keypair_from_scalar(&curve::scalar_from_secret(secret)?)
}

/// Builds the full key record for a non-zero scalar.
pub fn keypair_from_scalar(scalar: &NonZeroScalar) -> Result<KeyPair> {
    let public_key = PublicKey::from_secret_scalar(scalar);

    let uncompressed: [u8; UNCOMPRESSED_POINT_SIZE] = public_key
        .to_encoded_point(false)
        .as_bytes()
        .try_into()
        .map_err(|_| ShadeError::InvalidPoint("unexpected uncompressed SEC1 length".into()))?;
    let compressed: [u8; COMPRESSED_POINT_SIZE] = public_key
        .to_encoded_point(true)
        .as_bytes()
        .try_into()
        .map_err(|_| ShadeError::InvalidPoint("unexpected compressed SEC1 length".into()))?;

    let public_key_uncompressed = UncompressedPoint::from_array(uncompressed);
    Ok(KeyPair {
        private_key: SecretKeyBytes::from_array(scalar.to_bytes().into()),
        public_key_x: public_key_uncompressed.x(),
        public_key_uncompressed,
        public_key_compressed: CompressedPoint::from_array(compressed),
    })
}

/// Derives the checksummed Ethereum address of a key pair's public key.
pub fn eth_address(key_pair: &KeyPair) -> Result<String> {
    let raw = crate::hash::address_from_uncompressed(key_pair.public_key_uncompressed.as_bytes())?;
    Ok(crate::hash::to_checksum_address(&raw))
}
