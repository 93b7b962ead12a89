//! Receiver identity generation.
//!
//! A receiver publishes two independent public keys: the scan key (detects
//! incoming payments) and the spend key (claims them). The base address is
//! the ordinary Ethereum address of the spend key; funds never go there, it
//! only identifies the receiver in records.

use tracing::debug;

use shade_core::error::Result;
use shade_core::types::ReceiverIdentity;
use shade_crypto::keypair;

/// Generates a fresh dual-key receiver identity from the OS entropy source.
pub fn generate_receiver_identity() -> Result<ReceiverIdentity> {
    let scan = keypair::generate_keypair()?;
    let spend = keypair::generate_keypair()?;
    build(scan, spend)
}

/// Generates a receiver identity from the given RNG. Used by deterministic
/// tests.
pub fn generate_receiver_identity_from(rng: &mut impl rand::RngCore) -> Result<ReceiverIdentity> {
    let scan = keypair::generate_keypair_from(rng)?;
    let spend = keypair::generate_keypair_from(rng)?;
    build(scan, spend)
}

fn build(
    scan: shade_core::types::KeyPair,
    spend: shade_core::types::KeyPair,
) -> Result<ReceiverIdentity> {
    let base_eth_address = keypair::eth_address(&spend)?;
    debug!(base = %base_eth_address, "generated receiver identity");
    let identity = ReceiverIdentity {
        scan,
        spend,
        base_eth_address,
    };
    identity.validate()?;
    Ok(identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use shade_crypto::hash;

    #[test]
    fn test_identity_validates_and_keys_differ() {
        let id = generate_receiver_identity_from(&mut ChaCha20Rng::seed_from_u64(3)).unwrap();
        assert!(id.validate().is_ok());
        assert_ne!(
            id.scan.public_key_uncompressed,
            id.spend.public_key_uncompressed
        );
    }

    #[test]
    fn test_base_address_comes_from_spend_key() {
        let id = generate_receiver_identity_from(&mut ChaCha20Rng::seed_from_u64(4)).unwrap();
        let expected = hash::to_checksum_address(
            &hash::address_from_uncompressed(id.spend.public_key_uncompressed.as_bytes()).unwrap(),
        );
        assert_eq!(id.base_eth_address, expected);
    }
}
