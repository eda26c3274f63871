//! Client-local key/value storage backends for the cart.

use std::{
    cell::RefCell,
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
    rc::Rc,
};

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD as FILE_NAME};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Failures reading or writing persisted carts.
#[derive(Debug, Error)]
pub enum CartStorageError {
    /// Storage is disabled or otherwise cannot be used.
    #[error("storage unavailable")]
    Unavailable,

    /// The value does not fit in the remaining storage quota.
    #[error("storage quota exceeded")]
    QuotaExceeded,

    #[error("storage io error")]
    /// Filesystem error.
    Io(#[from] io::Error),
}

/// Minimal string key/value persistence primitive.
pub trait CartStorage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, CartStorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error when the storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), CartStorageError>;
}

/// In-process storage. Clones share the same entries, so a store rebuilt
/// from a clone sees everything written through the original.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<FxHashMap<String, String>>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Unbounded in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects any single value longer than `quota` bytes.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CartStorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CartStorageError> {
        if self.quota.is_some_and(|quota| value.len() > quota) {
            return Err(CartStorageError::QuotaExceeded);
        }

        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());

        Ok(())
    }
}

/// Directory-backed storage: one JSON file per key, named by the key's
/// URL-safe base64 encoding so distinct keys never share a file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`, created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the cart files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", FILE_NAME.encode(key)))
    }
}

impl CartStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CartStorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CartStorageError> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        let staging = path.with_extension("json.tmp");

        // Write then rename so a crash never leaves a half-written cart behind.
        fs::write(&staging, value)?;
        fs::rename(&staging, &path)?;

        Ok(())
    }
}
