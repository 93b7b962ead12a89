//! File-backed record store: one `<key>.json` per record.
//!
//! Writes go to a temporary sibling file first and are renamed into place,
//! so readers never observe a partially written record.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tracing::{debug, instrument};

use shade_core::error::{Result, ShadeError};
use shade_core::traits::RecordStore;

/// JSON-file-per-key store rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens a store at `dir`, creating the directory if needed.
    pub async fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    /// The directory holding the record files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        // Keys become file names; reject anything that could escape the
        // store directory.
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ShadeError::Storage(format!(
                "invalid record key: {key:?}"
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl RecordStore for FileStore {
    #[instrument(skip(self, record), fields(dir = %self.dir.display()))]
    async fn save(&self, key: &str, record: Value) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        let body = serde_json::to_string_pretty(&record)?;

        fs::write(&tmp, body.as_bytes()).await?;
        fs::rename(&tmp, &path).await?;
        debug!(key, "record saved");
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(body) => Ok(Some(serde_json::from_str(&body)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key)?;
        match fs::metadata(&path).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
