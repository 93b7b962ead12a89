//! # Shade Core
//!
//! Core types, errors, and traits for the Shade dual-key stealth address
//! protocol over secp256k1.
//!
//! This crate provides the foundational building blocks used by all other
//! Shade crates:
//!
//! - **Types**: key pairs, the dual-key receiver identity, announcements
//! - **Errors**: the shared `thiserror` hierarchy
//! - **Constants**: SEC1/address sizes and record keys
//! - **Traits**: the `RecordStore` storage interface
//!
//! All byte fields serialize as lower-case `0x`-prefixed hex strings.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod encoding;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{Result, ShadeError};
pub use traits::RecordStore;
pub use types::*;
