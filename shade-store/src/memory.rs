//! In-memory record store, used by tests and short-lived tooling.

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use shade_core::error::Result;
use shade_core::traits::RecordStore;

/// Concurrent in-memory store keyed by record name.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: DashMap<String, Value>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn save(&self, key: &str, record: Value) -> Result<()> {
        self.records.insert(key.to_string(), record);
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.records.get(key).map(|entry| entry.value().clone()))
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.records.contains_key(key))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.records.remove(key);
        Ok(())
    }
}
