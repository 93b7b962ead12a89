//! Common traits for Shade.

use async_trait::async_trait;

use crate::error::Result;

/// Interface for persisting JSON-like records by key.
///
/// The protocol core never assumes a particular storage medium; the
/// reference flow uses one JSON file per key, tests use an in-memory map.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Saves a record under `key`, replacing any existing record.
    async fn save(&self, key: &str, record: serde_json::Value) -> Result<()>;

    /// Loads the record stored under `key`, or `None` if absent.
    async fn load(&self, key: &str) -> Result<Option<serde_json::Value>>;

    /// Returns true if a record exists under `key`.
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Deletes the record under `key`, if any.
    async fn delete(&self, key: &str) -> Result<()>;
}
