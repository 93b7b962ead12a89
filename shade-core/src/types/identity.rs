//! Receiver identity: the dual-key record a receiver generates once.
//!
//! The scan key pair is used only for ECDH during announcement scanning;
//! the spend key pair anchors the base identity. Only the public components
//! and `baseEthAddress` are meant for distribution.

use serde::{Deserialize, Serialize};

use crate::constants::ETH_ADDRESS_STR_LEN;
use crate::error::{Result, ShadeError};
use crate::types::keys::KeyPair;

/// A receiver's dual-key identity record.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiverIdentity {
    /// Key pair used only for the ECDH shared secret (never signs)
    pub scan: KeyPair,
    /// Key pair anchoring the base identity; combines with the tweak
    pub spend: KeyPair,
    /// EIP-55 checksummed address derived from the spend public key
    pub base_eth_address: String,
}

impl ReceiverIdentity {
    /// Checks the structural consistency of the record.
    pub fn validate(&self) -> Result<()> {
        self.scan.validate()?;
        self.spend.validate()?;
        validate_address_string(&self.base_eth_address)?;
        Ok(())
    }
}

/// Checks that a string has the shape of a `0x`-prefixed 20-byte address.
pub fn validate_address_string(s: &str) -> Result<()> {
    if s.len() != ETH_ADDRESS_STR_LEN
        || !s.starts_with("0x")
        || !s[2..].chars().all(|c| c.is_ascii_hexdigit())
    {
        return Err(ShadeError::Validation(format!(
            "malformed Ethereum address string: {s:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed", true; "checksummed")]
    #[test_case("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed", true; "lowercase")]
    #[test_case("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed", false; "missing prefix")]
    #[test_case("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beae", false; "too short")]
    #[test_case("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaeg", false; "non hex")]
    fn test_address_string_validation(s: &str, ok: bool) {
        assert_eq!(validate_address_string(s).is_ok(), ok);
    }
}
