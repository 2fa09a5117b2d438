//! Persistence service: the palace as a single JSON file.
//!
//! DESIGN
//! ======
//! The whole palace is one document. Reads go straight to disk; writes land
//! in a sibling temp file that is renamed over the target, so a concurrent
//! reader sees either the old palace or the new one. Read-modify-write cycles
//! started by the server take the store's write lock through a
//! [`PalaceTxn`], so two of them never interleave. Whole-palace saves from
//! clients are last-write-wins.

use std::path::{Path, PathBuf};

use palace::Palace;
use thiserror::Error;
use tokio::fs;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no palace has been created")]
    NoPalace,
}

/// File-backed palace storage.
#[derive(Debug)]
pub struct PalaceStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl PalaceStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored palace.
    ///
    /// A missing file and a file holding an empty object `{}` both mean no
    /// palace yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub async fn load(&self) -> Result<Option<Palace>, PersistError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no palace file");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let value: serde_json::Value = serde_json::from_str(&raw)?;
        if value.as_object().is_some_and(serde_json::Map::is_empty) {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(value)?))
    }

    /// Overwrite the stored palace.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub async fn save(&self, palace: &Palace) -> Result<(), PersistError> {
        let _guard = self.write_lock.lock().await;
        self.write(palace).await
    }

    /// Take the write lock for a read-modify-write cycle.
    pub async fn begin(&self) -> PalaceTxn<'_> {
        PalaceTxn { store: self, _guard: self.write_lock.lock().await }
    }

    /// Load, mutate and save the palace under the write lock.
    ///
    /// Nothing is written when `f` fails.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::NoPalace`] (converted into `E`) when nothing is
    /// stored, any error from `f`, or a persistence error from the save.
    pub async fn update<T, E>(&self, f: impl FnOnce(&mut Palace) -> Result<T, E>) -> Result<T, E>
    where
        E: From<PersistError>,
    {
        let txn = self.begin().await;
        let mut palace = txn.load().await?.ok_or(PersistError::NoPalace)?;
        let out = f(&mut palace)?;
        txn.save(&palace).await?;
        Ok(out)
    }

    async fn write(&self, palace: &Palace) -> Result<(), PersistError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).await?;
        }
        let json = serde_json::to_string_pretty(palace)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;

        info!(path = %self.path.display(), rooms = palace.rooms.len(), "palace saved");
        Ok(())
    }
}

/// Exclusive access to the store for one read-modify-write cycle.
pub struct PalaceTxn<'a> {
    store: &'a PalaceStore,
    _guard: MutexGuard<'a, ()>,
}

impl PalaceTxn<'_> {
    /// # Errors
    ///
    /// See [`PalaceStore::load`].
    pub async fn load(&self) -> Result<Option<Palace>, PersistError> {
        self.store.load().await
    }

    /// # Errors
    ///
    /// See [`PalaceStore::save`].
    pub async fn save(&self, palace: &Palace) -> Result<(), PersistError> {
        self.store.write(palace).await
    }
}

#[cfg(test)]
#[path = "persistence_test.rs"]
mod tests;
