//! secp256k1 primitives.
//!
//! Thin wrappers over `k256` that pin down the exact behaviors the protocol
//! relies on:
//!
//! - uniform non-zero scalar generation via rejection sampling
//! - SEC1 point decode with on-curve and non-identity validation
//! - generator multiplication, point addition, scalar addition mod n
//! - digest reduction mod n for tweak derivation
//! - ECDH returning the shared X coordinate
//!
//! No curve state is cached anywhere; every call works from its arguments.

use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{NonZeroScalar, ProjectivePoint, PublicKey, Scalar, U256};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

use shade_core::constants::{COMPRESSED_POINT_SIZE, SECRET_KEY_SIZE, UNCOMPRESSED_POINT_SIZE};
use shade_core::error::{Result, ShadeError};
use shade_core::types::SecretKeyBytes;

/// Generates a uniformly random non-zero scalar from the OS entropy source.
///
/// # Errors
/// Returns `Entropy` if the OS random source fails.
pub fn generate_secret_scalar() -> Result<NonZeroScalar> {
    generate_secret_scalar_from(&mut OsRng)
}

/// Generates a non-zero scalar from the given RNG.
///
/// Candidates outside `[1, n-1]` are rejected and redrawn, which keeps the
/// distribution uniform. The expected number of draws is just over one.
pub fn generate_secret_scalar_from(rng: &mut impl RngCore) -> Result<NonZeroScalar> {
    loop {
        let mut buf = [0u8; SECRET_KEY_SIZE];
        rng.try_fill_bytes(&mut buf)
            .map_err(|e| ShadeError::Entropy(format!("random source failed: {e}")))?;
        let candidate = Option::<NonZeroScalar>::from(NonZeroScalar::from_repr(buf.into()));
        buf.zeroize();
        if let Some(scalar) = candidate {
            return Ok(scalar);
        }
    }
}

/// Interprets 32 secret bytes as a canonical non-zero scalar.
///
/// # Errors
/// Returns `Validation` if the bytes are zero or not below the curve order.
pub fn scalar_from_secret(secret: &SecretKeyBytes) -> Result<NonZeroScalar> {
    Option::<NonZeroScalar>::from(NonZeroScalar::from_repr((*secret.as_array()).into())).ok_or_else(
        || ShadeError::Validation("secret key is zero or not a canonical scalar mod n".into()),
    )
}

/// Returns the big-endian 32-byte encoding of a scalar.
pub fn scalar_to_bytes(scalar: &Scalar) -> [u8; SECRET_KEY_SIZE] {
    scalar.to_bytes().into()
}

/// Decodes a SEC1-encoded point (compressed or uncompressed).
///
/// Rejects off-curve encodings, the identity, and any length other than
/// 33 or 65 bytes.
pub fn decode_point(bytes: &[u8]) -> Result<PublicKey> {
    if bytes.len() != COMPRESSED_POINT_SIZE && bytes.len() != UNCOMPRESSED_POINT_SIZE {
        return Err(ShadeError::InvalidPoint(format!(
            "SEC1 point must be {} or {} bytes, got {}",
            COMPRESSED_POINT_SIZE,
            UNCOMPRESSED_POINT_SIZE,
            bytes.len()
        )));
    }
    PublicKey::from_sec1_bytes(bytes)
        .map_err(|_| ShadeError::InvalidPoint("bytes do not encode a point on secp256k1".into()))
}

/// Encodes a point in SEC1 form, compressed (33 bytes) or uncompressed (65).
pub fn encode_point(point: &PublicKey, compressed: bool) -> Vec<u8> {
    point.to_encoded_point(compressed).as_bytes().to_vec()
}

/// Multiplies the generator by a scalar: `scalar · G`.
pub fn mul_generator(scalar: &Scalar) -> ProjectivePoint {
    ProjectivePoint::GENERATOR * scalar
}

/// Adds two curve points.
pub fn point_add(a: &ProjectivePoint, b: &ProjectivePoint) -> ProjectivePoint {
    a + b
}

/// Adds two scalars mod the curve order n.
pub fn scalar_add(a: &Scalar, b: &Scalar) -> Scalar {
    a + b
}

/// Converts a projective point to a `PublicKey`, rejecting the identity.
pub fn to_public_key(point: &ProjectivePoint) -> Result<PublicKey> {
    PublicKey::from_affine(point.to_affine())
        .map_err(|_| ShadeError::InvalidPoint("derived point is the point at infinity".into()))
}

/// Reduces a 32-byte big-endian digest modulo the curve order n.
///
/// The result may be zero (probability ~2^-128 for random digests); callers
/// that need a non-zero tweak handle that case themselves.
pub fn reduce_digest(digest: [u8; 32]) -> Scalar {
    <Scalar as Reduce<U256>>::reduce_bytes(&digest.into())
}

/// Computes the X coordinate of `secret · point` (Diffie-Hellman).
///
/// # Errors
/// Returns `InvalidPoint` if the product is the point at infinity, which
/// for a valid public key and non-zero scalar cannot happen on secp256k1
/// (prime order, no small subgroups).
pub fn shared_x(secret: &Scalar, point: &PublicKey) -> Result<[u8; 32]> {
    let product = ProjectivePoint::from(*point.as_affine()) * secret;
    let shared = to_public_key(&product)
        .map_err(|_| ShadeError::InvalidPoint("ECDH produced the point at infinity".into()))?;
    let encoded = shared.to_encoded_point(false);
    let x = encoded
        .x()
        .ok_or_else(|| ShadeError::InvalidPoint("shared point has no X coordinate".into()))?;
    Ok((*x).into())
}
