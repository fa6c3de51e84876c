//! Flat on-disk cache of downloaded archives.
//!
//! Entries live at `<cache-home>/deps/<key>` and are never invalidated here.
//! New entries are written to a `.part` temp file in the same directory and
//! renamed into place on commit, so a reader never sees a half-written archive.

use crate::error::{FetchError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

#[derive(Debug, Clone)]
pub struct DepCache {
    dir: PathBuf,
}

impl DepCache {
    pub fn new(cache_home: &Path) -> Self {
        Self {
            dir: cache_home.join("deps"),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entry_path(key).is_file()
    }

    /// Start writing a new entry. Nothing is visible under `key` until [`CacheWriter::commit`].
    pub fn begin_write(&self, key: &str) -> Result<CacheWriter> {
        fs::create_dir_all(&self.dir).map_err(FetchError::io(&self.dir))?;
        let file = tempfile::Builder::new()
            .prefix(&format!("{key}."))
            .suffix(TEMP_SUFFIX)
            .tempfile_in(&self.dir)
            .map_err(FetchError::io(&self.dir))?;
        Ok(CacheWriter {
            file,
            final_path: self.entry_path(key),
            written: 0,
        })
    }

    /// Delete an entry; a missing entry is not an error.
    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FetchError::io(path)(e)),
        }
    }
}

/// Sequential writer for one cache entry. Dropping it without committing
/// deletes the temp file.
pub struct CacheWriter {
    file: NamedTempFile,
    final_path: PathBuf,
    written: u64,
}

impl CacheWriter {
    pub fn write_chunk(&mut self, data: &[u8]) -> Result<()> {
        self.file
            .write_all(data)
            .map_err(FetchError::io(self.file.path()))?;
        self.written += data.len() as u64;
        Ok(())
    }

    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    pub fn temp_path(&self) -> &Path {
        self.file.path()
    }

    /// Sync and atomically rename the temp file to the entry path.
    pub fn commit(self) -> Result<PathBuf> {
        let temp_path = self.file.path().to_path_buf();
        self.file
            .as_file()
            .sync_all()
            .map_err(FetchError::io(&temp_path))?;
        self.file
            .persist(&self.final_path)
            .map_err(|e| FetchError::io(&temp_path)(e.error))?;
        Ok(self.final_path)
    }
}
