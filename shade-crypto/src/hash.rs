//! Keccak-256 hashing and Ethereum address derivation.

use sha3::{Digest, Keccak256};
use subtle::ConstantTimeEq;

use shade_core::constants::{
    ETH_ADDRESS_SIZE, KECCAK256_SIZE, SEC1_UNCOMPRESSED_TAG, UNCOMPRESSED_POINT_SIZE,
};
use shade_core::encoding;
use shade_core::error::{Result, ShadeError};

/// Computes the Keccak-256 digest of the input.
///
/// This is the original Keccak as used by Ethereum, not NIST SHA3-256.
pub fn keccak256(data: &[u8]) -> [u8; KECCAK256_SIZE] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Derives the 20-byte Ethereum address from an uncompressed SEC1 public key.
///
/// The address is the last 20 bytes of `keccak256(X || Y)`; the 0x04 tag is
/// not hashed.
pub fn address_from_uncompressed(public_key: &[u8]) -> Result<[u8; ETH_ADDRESS_SIZE]> {
    if public_key.len() != UNCOMPRESSED_POINT_SIZE {
        return Err(ShadeError::InvalidPoint(format!(
            "address derivation needs a {}-byte uncompressed key, got {}",
            UNCOMPRESSED_POINT_SIZE,
            public_key.len()
        )));
    }
    if public_key[0] != SEC1_UNCOMPRESSED_TAG {
        return Err(ShadeError::InvalidPoint(format!(
            "address derivation needs the 0x04 SEC1 tag, got 0x{:02x}",
            public_key[0]
        )));
    }
    let digest = keccak256(&public_key[1..]);
    let mut address = [0u8; ETH_ADDRESS_SIZE];
    address.copy_from_slice(&digest[KECCAK256_SIZE - ETH_ADDRESS_SIZE..]);
    Ok(address)
}

/// Formats an address with the EIP-55 mixed-case checksum.
///
/// Each hex digit is uppercased when the corresponding nibble of
/// `keccak256(lowercase_hex_without_prefix)` is 8 or above.
pub fn to_checksum_address(address: &[u8; ETH_ADDRESS_SIZE]) -> String {
    let lower = hex::encode(address);
    let digest = keccak256(lower.as_bytes());

    let mut out = String::with_capacity(2 + lower.len());
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            digest[i / 2] >> 4
        } else {
            digest[i / 2] & 0x0F
        };
        if nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Parses an address string (checksummed or not) into its 20 bytes.
pub fn parse_address(s: &str) -> Result<[u8; ETH_ADDRESS_SIZE]> {
    let bytes = encoding::decode(s)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| ShadeError::InvalidKeySize {
            expected: ETH_ADDRESS_SIZE,
            actual: bytes.len(),
        })
}

/// Compares two address strings by their underlying bytes, ignoring
/// checksum casing. Malformed input compares unequal.
///
/// The byte comparison is constant-time; this helper is also used on the
/// receiver side where the candidate address is secret-derived.
pub fn addresses_equal(a: &str, b: &str) -> bool {
    match (parse_address(a), parse_address(b)) {
        (Ok(left), Ok(right)) => left[..].ct_eq(&right[..]).into(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test]
    fn test_keccak256_empty_input() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_keccak256_hello() {
        assert_eq!(
            hex::encode(keccak256(b"hello")),
            "1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }

    // EIP-55 reference vectors.
    #[test_case("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed")]
    #[test_case("0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359")]
    #[test_case("0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB")]
    #[test_case("0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb")]
    #[test_case("0x52908400098527886E0F7030069857D2E4169EE7"; "all caps 1")]
    #[test_case("0x8617E340B3D01FA5F11F306F4090FD50E238070D"; "all caps 2")]
    #[test_case("0xde709f2102306220921060314715629080e2fb77"; "all lower 1")]
    #[test_case("0x27b1fdb04752bbc536007a920d24acb045561c26"; "all lower 2")]
    fn test_eip55_reference_vectors(expected: &str) {
        let bytes = parse_address(expected).unwrap();
        assert_eq!(to_checksum_address(&bytes), expected);
    }

    #[test]
    fn test_address_ignores_sec1_tag() {
        // keccak256 of 64 zero bytes, last 20 bytes.
        let mut key = [0u8; 65];
        key[0] = 0x04;
        let address = address_from_uncompressed(&key).unwrap();
        let expected = &keccak256(&[0u8; 64])[12..];
        assert_eq!(&address[..], expected);
    }

    #[test_case(64; "missing tag byte")]
    #[test_case(33; "compressed length")]
    #[test_case(66; "one byte extra")]
    fn test_address_rejects_wrong_length(len: usize) {
        let bytes = vec![0x04u8; len];
        assert!(address_from_uncompressed(&bytes).is_err());
    }

    #[test]
    fn test_address_rejects_wrong_tag() {
        let key = [0x02u8; 65];
        assert!(matches!(
            address_from_uncompressed(&key),
            Err(ShadeError::InvalidPoint(_))
        ));
    }

    #[test]
    fn test_addresses_equal_ignores_case() {
        assert!(addresses_equal(
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"
        ));
        assert!(!addresses_equal(
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0x27b1fdb04752bbc536007a920d24acb045561c26"
        ));
        assert!(!addresses_equal("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed", "garbage"));
    }

    proptest! {
        #[test]
        fn prop_checksum_roundtrips(address in prop::array::uniform20(any::<u8>())) {
            let checksummed = to_checksum_address(&address);
            prop_assert_eq!(checksummed.len(), 42);
            prop_assert!(checksummed.starts_with("0x"));
            prop_assert_eq!(parse_address(&checksummed).unwrap(), address);
            // Re-checksumming is idempotent.
            prop_assert_eq!(to_checksum_address(&parse_address(&checksummed).unwrap()), checksummed);
        }
    }
}
