//! Key material types for Shade.
//!
//! This module defines the byte-level key structures used in the protocol:
//!
//! - [`SecretKeyBytes`]: a 32-byte secp256k1 scalar (zeroized on drop)
//! - [`UncompressedPoint`]: a 65-byte SEC1 point (0x04 || X || Y)
//! - [`CompressedPoint`]: a 33-byte SEC1 point (0x02/0x03 || X)
//! - [`Coordinate`]: a 32-byte affine coordinate
//! - [`KeyPair`]: the full serializable key record in all encodings
//!
//! The curve arithmetic that produces and validates these lives in
//! `shade-crypto`; these types only enforce shape (length and tag bytes)
//! and the hex wire format.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{
    COMPRESSED_POINT_SIZE, COORDINATE_SIZE, SEC1_COMPRESSED_TAG_EVEN, SEC1_COMPRESSED_TAG_ODD,
    SEC1_UNCOMPRESSED_TAG, SECRET_KEY_SIZE, UNCOMPRESSED_POINT_SIZE,
};
use crate::encoding;
use crate::error::{Result, ShadeError};

// ═══════════════════════════════════════════════════════════════════════════════
// SECRET KEY
// ═══════════════════════════════════════════════════════════════════════════════

/// A 32-byte secp256k1 private scalar.
///
/// Sensitive: zeroized on drop, never printed by `Debug`. Whether the bytes
/// form a canonical non-zero scalar is checked by `shade-crypto` when the
/// value is actually used.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretKeyBytes([u8; SECRET_KEY_SIZE]);

impl SecretKeyBytes {
    /// Creates a secret key from raw bytes.
    ///
    /// # Errors
    /// Returns `InvalidKeySize` if the length is not 32.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SECRET_KEY_SIZE {
            return Err(ShadeError::InvalidKeySize {
                expected: SECRET_KEY_SIZE,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; SECRET_KEY_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }

    /// Creates a secret key from a fixed-size array.
    pub fn from_array(bytes: [u8; SECRET_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    ///
    /// # Security
    /// Handle the returned bytes carefully - do not log or expose them.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the key as a fixed-size array reference.
    pub fn as_array(&self) -> &[u8; SECRET_KEY_SIZE] {
        &self.0
    }

    /// Returns the `0x`-prefixed hex encoding.
    pub fn to_hex(&self) -> String {
        encoding::encode(&self.0)
    }

    /// Parses from a hex string (optional `0x` prefix).
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = encoding::decode(s)?;
        Self::from_bytes(&bytes)
    }
}

impl std::fmt::Debug for SecretKeyBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose secret key content
        write!(f, "SecretKeyBytes([REDACTED])")
    }
}

impl Serialize for SecretKeyBytes {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SecretKeyBytes {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// UNCOMPRESSED POINT
// ═══════════════════════════════════════════════════════════════════════════════

/// A 65-byte uncompressed SEC1 point encoding: 0x04 || X || Y.
///
/// Only the shape is enforced here; on-curve validation happens when the
/// point is decoded by `shade-crypto`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct UncompressedPoint([u8; UNCOMPRESSED_POINT_SIZE]);

impl UncompressedPoint {
    /// Creates a point from raw bytes, checking length and the 0x04 tag.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != UNCOMPRESSED_POINT_SIZE {
            return Err(ShadeError::InvalidPoint(format!(
                "uncompressed point must be {} bytes, got {}",
                UNCOMPRESSED_POINT_SIZE,
                bytes.len()
            )));
        }
        if bytes[0] != SEC1_UNCOMPRESSED_TAG {
            return Err(ShadeError::InvalidPoint(format!(
                "uncompressed point must start with 0x04, got 0x{:02x}",
                bytes[0]
            )));
        }
        let mut arr = [0u8; UNCOMPRESSED_POINT_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }

    /// Creates a point from a fixed-size array without re-checking the tag.
    ///
    /// Intended for `shade-crypto`, which only produces valid encodings.
    pub fn from_array(bytes: [u8; UNCOMPRESSED_POINT_SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns the raw 65 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the X coordinate (bytes 1..33).
    pub fn x(&self) -> Coordinate {
        let mut x = [0u8; COORDINATE_SIZE];
        x.copy_from_slice(&self.0[1..1 + COORDINATE_SIZE]);
        Coordinate::from_array(x)
    }

    /// Returns true if the Y coordinate is odd (used for the compressed tag).
    pub fn y_is_odd(&self) -> bool {
        self.0[UNCOMPRESSED_POINT_SIZE - 1] & 1 == 1
    }

    /// Returns the `0x`-prefixed hex encoding.
    pub fn to_hex(&self) -> String {
        encoding::encode(&self.0)
    }

    /// Parses from a hex string (optional `0x` prefix).
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = encoding::decode(s)?;
        Self::from_bytes(&bytes)
    }
}

impl std::fmt::Debug for UncompressedPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Only show first/last 4 bytes for readability
        write!(
            f,
            "UncompressedPoint({}...{})",
            hex::encode(&self.0[..4]),
            hex::encode(&self.0[UNCOMPRESSED_POINT_SIZE - 4..])
        )
    }
}

impl Serialize for UncompressedPoint {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for UncompressedPoint {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMPRESSED POINT
// ═══════════════════════════════════════════════════════════════════════════════

/// A 33-byte compressed SEC1 point encoding: 0x02/0x03 || X.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CompressedPoint([u8; COMPRESSED_POINT_SIZE]);

impl CompressedPoint {
    /// Creates a point from raw bytes, checking length and the tag byte.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != COMPRESSED_POINT_SIZE {
            return Err(ShadeError::InvalidPoint(format!(
                "compressed point must be {} bytes, got {}",
                COMPRESSED_POINT_SIZE,
                bytes.len()
            )));
        }
        if bytes[0] != SEC1_COMPRESSED_TAG_EVEN && bytes[0] != SEC1_COMPRESSED_TAG_ODD {
            return Err(ShadeError::InvalidPoint(format!(
                "compressed point must start with 0x02 or 0x03, got 0x{:02x}",
                bytes[0]
            )));
        }
        let mut arr = [0u8; COMPRESSED_POINT_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }

    /// Creates a point from a fixed-size array without re-checking the tag.
    pub fn from_array(bytes: [u8; COMPRESSED_POINT_SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns the raw 33 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the tag byte (0x02 even Y, 0x03 odd Y).
    pub fn tag(&self) -> u8 {
        self.0[0]
    }

    /// Returns the `0x`-prefixed hex encoding.
    pub fn to_hex(&self) -> String {
        encoding::encode(&self.0)
    }

    /// Parses from a hex string (optional `0x` prefix).
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = encoding::decode(s)?;
        Self::from_bytes(&bytes)
    }
}

impl std::fmt::Debug for CompressedPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CompressedPoint({})", hex::encode(&self.0[..5]))
    }
}

impl Serialize for CompressedPoint {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for CompressedPoint {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// COORDINATE
// ═══════════════════════════════════════════════════════════════════════════════

/// A 32-byte big-endian affine coordinate (or Keccak digest).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Coordinate([u8; COORDINATE_SIZE]);

impl Coordinate {
    /// Creates a coordinate from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != COORDINATE_SIZE {
            return Err(ShadeError::InvalidKeySize {
                expected: COORDINATE_SIZE,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; COORDINATE_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }

    /// Creates a coordinate from a fixed-size array.
    pub fn from_array(bytes: [u8; COORDINATE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns the raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the coordinate as a fixed-size array reference.
    pub fn as_array(&self) -> &[u8; COORDINATE_SIZE] {
        &self.0
    }

    /// Returns the `0x`-prefixed hex encoding.
    pub fn to_hex(&self) -> String {
        encoding::encode(&self.0)
    }

    /// Parses from a hex string (optional `0x` prefix).
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = encoding::decode(s)?;
        Self::from_bytes(&bytes)
    }
}

impl std::fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Coordinate({})", self.to_hex())
    }
}

impl Serialize for Coordinate {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// KEY PAIR
// ═══════════════════════════════════════════════════════════════════════════════

/// A complete secp256k1 key pair record in all encodings.
///
/// Invariant (enforced by `shade-crypto` at construction):
/// `publicKey = privateKey · G` and `0 < privateKey < n`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPair {
    /// Private scalar (keep secret, auto-zeroized)
    pub private_key: SecretKeyBytes,
    /// Uncompressed public key: 0x04 || X || Y
    pub public_key_uncompressed: UncompressedPoint,
    /// Compressed public key: 0x02/0x03 || X
    pub public_key_compressed: CompressedPoint,
    /// X coordinate of the public key
    pub public_key_x: Coordinate,
}

impl KeyPair {
    /// Checks internal consistency of the encodings.
    ///
    /// This is a structural check only (X coordinates agree, compressed tag
    /// matches Y parity); it does not redo the curve arithmetic.
    pub fn validate(&self) -> Result<()> {
        if self.public_key_x != self.public_key_uncompressed.x() {
            return Err(ShadeError::Validation(
                "publicKeyX does not match the uncompressed encoding".into(),
            ));
        }
        if self.public_key_compressed.as_bytes()[1..] != self.public_key_uncompressed.as_bytes()[1..33]
        {
            return Err(ShadeError::Validation(
                "compressed and uncompressed X coordinates differ".into(),
            ));
        }
        let expected_tag = if self.public_key_uncompressed.y_is_odd() {
            SEC1_COMPRESSED_TAG_ODD
        } else {
            SEC1_COMPRESSED_TAG_EVEN
        };
        if self.public_key_compressed.tag() != expected_tag {
            return Err(ShadeError::Validation(
                "compressed tag does not match Y parity".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn sample_uncompressed() -> [u8; UNCOMPRESSED_POINT_SIZE] {
        let mut bytes = [0x11u8; UNCOMPRESSED_POINT_SIZE];
        bytes[0] = SEC1_UNCOMPRESSED_TAG;
        bytes[UNCOMPRESSED_POINT_SIZE - 1] = 0x02; // even Y
        bytes
    }

    #[test]
    fn test_secret_key_roundtrip() {
        let sk = SecretKeyBytes::from_array([0xAB; 32]);
        let hex = sk.to_hex();
        assert!(hex.starts_with("0x"));
        assert_eq!(SecretKeyBytes::from_hex(&hex).unwrap(), sk);
    }

    #[test]
    fn test_secret_key_debug_redacted() {
        let sk = SecretKeyBytes::from_array([0x42; 32]);
        let debug = format!("{:?}", sk);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("42"));
    }

    #[test_case(31; "too short")]
    #[test_case(33; "too long")]
    fn test_secret_key_wrong_size(len: usize) {
        let bytes = vec![1u8; len];
        assert!(matches!(
            SecretKeyBytes::from_bytes(&bytes),
            Err(ShadeError::InvalidKeySize { .. })
        ));
    }

    #[test]
    fn test_uncompressed_point_rejects_bad_tag() {
        let mut bytes = sample_uncompressed();
        bytes[0] = 0x02;
        assert!(matches!(
            UncompressedPoint::from_bytes(&bytes),
            Err(ShadeError::InvalidPoint(_))
        ));
    }

    #[test]
    fn test_uncompressed_point_rejects_64_bytes() {
        // A raw X||Y without the SEC1 tag must not be accepted.
        let bytes = [0x11u8; 64];
        assert!(matches!(
            UncompressedPoint::from_bytes(&bytes),
            Err(ShadeError::InvalidPoint(_))
        ));
    }

    #[test]
    fn test_uncompressed_point_x_slice() {
        let mut bytes = sample_uncompressed();
        bytes[1] = 0xAA;
        bytes[32] = 0xBB;
        let point = UncompressedPoint::from_bytes(&bytes).unwrap();
        let x = point.x();
        assert_eq!(x.as_bytes()[0], 0xAA);
        assert_eq!(x.as_bytes()[31], 0xBB);
    }

    #[test_case(0x02, true; "even tag")]
    #[test_case(0x03, true; "odd tag")]
    #[test_case(0x04, false; "uncompressed tag rejected")]
    #[test_case(0x00, false; "zero tag rejected")]
    fn test_compressed_point_tags(tag: u8, ok: bool) {
        let mut bytes = [0x22u8; COMPRESSED_POINT_SIZE];
        bytes[0] = tag;
        assert_eq!(CompressedPoint::from_bytes(&bytes).is_ok(), ok);
    }

    #[test]
    fn test_keypair_serde_camel_case() {
        let uncompressed = UncompressedPoint::from_bytes(&sample_uncompressed()).unwrap();
        let mut compressed = [0x11u8; COMPRESSED_POINT_SIZE];
        compressed[0] = SEC1_COMPRESSED_TAG_EVEN;
        let kp = KeyPair {
            private_key: SecretKeyBytes::from_array([0x01; 32]),
            public_key_uncompressed: uncompressed,
            public_key_compressed: CompressedPoint::from_bytes(&compressed).unwrap(),
            public_key_x: uncompressed.x(),
        };
        assert!(kp.validate().is_ok());

        let json = serde_json::to_string(&kp).unwrap();
        assert!(json.contains("\"privateKey\""));
        assert!(json.contains("\"publicKeyUncompressed\""));
        assert!(json.contains("\"publicKeyCompressed\""));
        assert!(json.contains("\"publicKeyX\""));

        let restored: KeyPair = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, kp);
    }

    #[test]
    fn test_keypair_validate_detects_mismatched_x() {
        let uncompressed = UncompressedPoint::from_bytes(&sample_uncompressed()).unwrap();
        let mut compressed = [0x11u8; COMPRESSED_POINT_SIZE];
        compressed[0] = SEC1_COMPRESSED_TAG_EVEN;
        let kp = KeyPair {
            private_key: SecretKeyBytes::from_array([0x01; 32]),
            public_key_uncompressed: uncompressed,
            public_key_compressed: CompressedPoint::from_bytes(&compressed).unwrap(),
            public_key_x: Coordinate::from_array([0xFF; 32]),
        };
        assert!(kp.validate().is_err());
    }

    #[test]
    fn test_keypair_validate_detects_wrong_parity_tag() {
        let uncompressed = UncompressedPoint::from_bytes(&sample_uncompressed()).unwrap();
        let mut compressed = [0x11u8; COMPRESSED_POINT_SIZE];
        compressed[0] = SEC1_COMPRESSED_TAG_ODD; // Y is even in the sample
        let kp = KeyPair {
            private_key: SecretKeyBytes::from_array([0x01; 32]),
            public_key_uncompressed: uncompressed,
            public_key_compressed: CompressedPoint::from_bytes(&compressed).unwrap(),
            public_key_x: uncompressed.x(),
        };
        assert!(kp.validate().is_err());
    }
}
