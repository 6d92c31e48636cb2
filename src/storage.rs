//! Durable client storage for the session token.
//!
//! SYSTEM CONTEXT
//! ==============
//! Models browser-style key/value storage: string keys, string values,
//! surviving process restarts. The gateway is the only writer of
//! [`AUTH_TOKEN_KEY`]; other components must go through it.
//!
//! `FileStorage` keeps every key in one JSON object file and replaces the
//! file on each write so a crash never leaves a half-written token behind.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Storage key holding the raw bearer token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";
/// Storage key for the cosmetic remember-me flag.
pub const REMEMBER_ME_KEY: &str = "rememberMe";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage file {path} is not a JSON object: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Key/value store that outlives the gateway instance.
pub trait DurableStorage: Send + Sync {
    /// Read the value for `key`, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

// =============================================================================
// MEMORY
// =============================================================================

/// Process-local storage. Useful for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed storage with an existing token, as if left by a previous run.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        let storage = Self::new();
        storage
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(AUTH_TOKEN_KEY.to_owned(), token.to_owned());
        storage
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl DurableStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries().remove(key);
        Ok(())
    }
}

// =============================================================================
// FILE
// =============================================================================

/// Storage persisted as a single JSON object file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(StorageError::Io { path: self.path.clone(), source }),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt { path: self.path.clone(), source })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io { path: self.path.clone(), source };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let rendered = serde_json::to_string_pretty(entries)
            .map_err(|source| StorageError::Corrupt { path: self.path.clone(), source })?;

        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, rendered).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)
    }

    fn modify<F>(&self, f: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let _guard = self
            .lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut reset = false;
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            // A write replaces the whole file, so an unreadable one is reset.
            Err(StorageError::Corrupt { path, source }) => {
                tracing::warn!(path = %path.display(), error = %source, "storage file corrupt; resetting");
                reset = true;
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        if f(&mut entries) || reset {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

impl DurableStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self
            .lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.modify(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.modify(|entries| entries.remove(key).is_some())
    }
}
