//! Directory-backed storage
//!
//! Each key is stored in its own `<key>.json` file. Writes go to a temporary
//! sibling first and are renamed into place, so a reader never observes a
//! half-written log.

use crate::adapter::StorageAdapter;
use crate::error::{Result, StorageError};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// When file writes are flushed to disk.
///
/// | Mode | Use Case |
/// |------|----------|
/// | None | Tests, caches |
/// | Strict | Logs that must survive a crash right after a write |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// Leave flushing to the OS
    #[default]
    None,

    /// fsync the file before it is renamed into place
    Strict,
}

impl SyncMode {
    /// Check if every write must be fsynced
    pub fn requires_fsync(&self) -> bool {
        matches!(self, SyncMode::Strict)
    }
}

/// Storage keeping one file per key under a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    sync: SyncMode,
}

impl FileStorage {
    /// Open storage rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(dir, SyncMode::default())
    }

    /// Open storage with an explicit sync mode
    pub fn open_with(dir: impl AsRef<Path>, sync: SyncMode) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, sync })
    }

    /// Directory the files live in
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Sync mode in effect
    pub fn sync_mode(&self) -> SyncMode {
        self.sync
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl StorageAdapter for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!(".{}.json.tmp", key));

        let mut file = fs::File::create(&tmp)?;
        file.write_all(value.as_bytes())?;
        if self.sync.requires_fsync() {
            file.sync_all()?;
        }
        drop(file);

        fs::rename(&tmp, &path)?;
        Ok(())
    }
}
