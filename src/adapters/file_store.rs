//! File-backed secure store.
//!
//! Keys live in a single JSON object at `~/.playshare/.session.json`,
//! readable only by the owner on unix.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::session::StoreKey;
use crate::traits::{SecureStore, StoreError};

/// The store directory name.
const STORE_DIR: &str = ".playshare";

/// The store file name.
const STORE_FILE: &str = ".session.json";

/// Secure store persisted to a JSON file.
#[derive(Debug)]
pub struct FileSecureStore {
    path: PathBuf,
    // Serializes read-modify-write cycles.
    lock: Mutex<()>,
}

impl FileSecureStore {
    /// Store at the default location under the home directory.
    pub fn new() -> Result<Self, StoreError> {
        let home = dirs::home_dir()
            .ok_or_else(|| StoreError::Unavailable("home directory not found".to_string()))?;
        Ok(Self::at(home.join(STORE_DIR).join(STORE_FILE)))
    }

    /// Store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path to the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let file = File::open(&self.path).map_err(|e| StoreError::ReadFailed(e.to_string()))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if map.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path).map_err(|e| StoreError::WriteFailed(e.to_string()))?;
            }
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StoreError::WriteFailed(e.to_string()))?;
            }
        }

        let file = File::create(&self.path).map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        restrict_permissions(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, map)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| StoreError::WriteFailed(e.to_string()))
    }

    fn modify(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StoreError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;
        let mut map = self.read_map()?;
        f(&mut map);
        self.write_map(&map)
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .map_err(|e| StoreError::WriteFailed(e.to_string()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

#[async_trait]
impl SecureStore for FileSecureStore {
    async fn get(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;
        Ok(self.read_map()?.remove(key.as_str()))
    }

    async fn set(&self, key: StoreKey, value: &str) -> Result<(), StoreError> {
        self.modify(|map| {
            map.insert(key.as_str().to_string(), value.to_string());
        })
    }

    async fn delete(&self, key: StoreKey) -> Result<(), StoreError> {
        self.modify(|map| {
            map.remove(key.as_str());
        })
    }
}
