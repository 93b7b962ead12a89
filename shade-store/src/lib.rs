//! # Shade Store
//!
//! [`RecordStore`] backends and typed helpers:
//!
//! - [`MemoryStore`]: concurrent in-memory map
//! - [`FileStore`]: one JSON file per record with atomic replacement
//! - [`RecordStoreExt`]: serialize/deserialize records as concrete types
//!
//! The reference flow persists two records, `receiver` and `announcement`;
//! the store itself is key-agnostic.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use shade_core::error::{Result, ShadeError};
use shade_core::traits::RecordStore;

/// Typed convenience layer over any [`RecordStore`].
#[async_trait]
pub trait RecordStoreExt: RecordStore {
    /// Serializes `value` and saves it under `key`.
    async fn save_as<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + Sync,
    {
        self.save(key, serde_json::to_value(value)?).await
    }

    /// Loads and deserializes the record under `key`, if present.
    async fn load_as<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send,
    {
        match self.load(key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Loads the record under `key`, failing with `RecordNotFound` if absent.
    async fn load_required<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned + Send,
    {
        self.load_as(key)
            .await?
            .ok_or_else(|| ShadeError::RecordNotFound(key.to_string()))
    }
}

impl<S: RecordStore + ?Sized> RecordStoreExt for S {}
