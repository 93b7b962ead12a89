//! Error types for Shade.
//!
//! A single `thiserror` hierarchy shared by all crates in the workspace.
//! Decoding and entropy failures abort the single operation that hit them;
//! a stealth-address verification mismatch is never an error (it is the
//! normal outcome of scanning an announcement addressed to someone else)
//! and is therefore represented as data, not as a variant here.

use thiserror::Error;

/// Result type alias using `ShadeError`.
pub type Result<T> = std::result::Result<T, ShadeError>;

/// Main error type for all Shade operations.
#[derive(Debug, Error)]
pub enum ShadeError {
    // ═══════════════════════════════════════════════════════════════════════════
    // CRYPTOGRAPHIC ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// A byte sequence does not decode to a valid secp256k1 point.
    #[error("Invalid curve point: {0}")]
    InvalidPoint(String),

    /// A receiver scan or spend public key failed to decode.
    #[error("Invalid receiver key: {0}")]
    InvalidReceiverKey(String),

    /// An announcement is structurally malformed.
    #[error("Invalid announcement: {0}")]
    InvalidAnnouncement(String),

    /// The entropy source failed; no key material can be produced safely.
    #[error("Entropy source unavailable: {0}")]
    Entropy(String),

    /// Invalid key or point size.
    #[error("Invalid key size: expected {expected} bytes, got {actual}")]
    InvalidKeySize { expected: usize, actual: usize },

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// Invalid hex encoding.
    #[error("Invalid hex encoding: {0}")]
    Hex(#[from] hex::FromHexError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // STORAGE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record required by the operation is not present in storage.
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// Storage backend failure.
    #[error("Storage error: {0}")]
    Storage(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// Input validation failed.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ShadeError {
    /// Returns true if this is a cryptographic error.
    pub fn is_crypto_error(&self) -> bool {
        matches!(
            self,
            ShadeError::InvalidPoint(_)
                | ShadeError::InvalidReceiverKey(_)
                | ShadeError::Entropy(_)
                | ShadeError::InvalidKeySize { .. }
        )
    }

    /// Returns true if this is a validation error: the offending input should
    /// be rejected, but the caller may continue with other inputs.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            ShadeError::Validation(_)
                | ShadeError::InvalidAnnouncement(_)
                | ShadeError::InvalidPoint(_)
                | ShadeError::Hex(_)
        )
    }

    /// Returns true if the whole process should stop: without entropy no key
    /// material can be produced at all.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ShadeError::Entropy(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ShadeError::InvalidKeySize {
            expected: 65,
            actual: 64,
        };
        assert!(err.to_string().contains("65"));
        assert!(err.to_string().contains("64"));
    }

    #[test]
    fn test_error_classification() {
        assert!(ShadeError::InvalidPoint("test".into()).is_crypto_error());
        assert!(ShadeError::Entropy("test".into()).is_crypto_error());
        assert!(ShadeError::Entropy("test".into()).is_fatal());
        assert!(!ShadeError::InvalidAnnouncement("test".into()).is_fatal());
        assert!(ShadeError::InvalidAnnouncement("test".into()).is_validation_error());
        assert!(!ShadeError::RecordNotFound("receiver".into()).is_crypto_error());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str("invalid");
        let shade_result: Result<serde_json::Value> = json_result.map_err(ShadeError::from);
        assert!(matches!(shade_result, Err(ShadeError::Json(_))));
    }
}
