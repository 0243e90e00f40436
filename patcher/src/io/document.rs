//! Document load/store: the only filesystem surface of a driver run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Whole-run-fatal storage failures. Per-step problems never show up here;
/// they are converted into report entries by the driver.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// In-memory text buffer for one backing file.
///
/// Content is UTF-8 only; anything else fails the load. The document is read
/// once per run and written back at most once.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub content: String,
}

impl Document {
    /// Read the whole file into memory.
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let content = fs::read_to_string(path).map_err(|source| StorageError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = content.len(), "document loaded");
        Ok(Self {
            path: path.to_path_buf(),
            content,
        })
    }

    /// Overwrite the backing file with the current content.
    ///
    /// Writes a sibling temp file and renames it into place, so a failed
    /// write leaves the original bytes exactly as they were.
    pub fn store(&self) -> Result<(), StorageError> {
        let tmp_path = self.path.with_extension("patcher.tmp");
        fs::write(&tmp_path, &self.content).map_err(|source| StorageError::Write {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), bytes = self.content.len(), "document written");
        Ok(())
    }
}
