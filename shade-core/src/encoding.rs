//! `0x`-prefixed hex helpers.
//!
//! All byte fields in persisted records are lower-case hexadecimal strings
//! with a `0x` prefix. Decoding accepts the prefix as optional so records
//! produced by other tooling remain readable.

use crate::error::Result;

/// Encodes bytes as a lower-case `0x`-prefixed hex string.
pub fn encode(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decodes a hex string, tolerating an optional `0x`/`0X` prefix.
pub fn decode(s: &str) -> Result<Vec<u8>> {
    let s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    Ok(hex::decode(s)?)
}

/// Serde adapter for `Vec<u8>` fields stored as `0x` hex strings.
pub mod serde_vec {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::decode(&s).map_err(serde::de::Error::custom)
    }
}
