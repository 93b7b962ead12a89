//! Domain types for the Shade protocol.

mod announcement;
mod identity;
mod keys;

pub use announcement::Announcement;
pub use identity::{validate_address_string, ReceiverIdentity};
pub use keys::{CompressedPoint, Coordinate, KeyPair, SecretKeyBytes, UncompressedPoint};
