//! Test-only helpers for constructing steps and scratch documents.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::anchor::{Anchor, Occurrence};
use crate::core::guard::Marker;
use crate::core::step::{Placement, TransformStep};

/// Literal anchor with an explicit occurrence.
pub fn literal(pattern: &str, occurrence: Occurrence) -> Anchor {
    Anchor::literal(pattern, occurrence).expect("valid literal anchor")
}

/// Step inserting `replacement` before the first `pattern` match, guarded by
/// `marker` presence.
pub fn insert_before(name: &str, pattern: &str, marker: &str, replacement: &str) -> TransformStep {
    TransformStep {
        name: name.to_string(),
        marker: Marker::contains(marker).expect("valid marker"),
        placement: Placement::Before(literal(pattern, Occurrence::First)),
        replacement: replacement.to_string(),
    }
}

/// Step inserting `replacement` after the first `pattern` match, guarded by
/// `marker` presence.
pub fn insert_after(name: &str, pattern: &str, marker: &str, replacement: &str) -> TransformStep {
    TransformStep {
        name: name.to_string(),
        marker: Marker::contains(marker).expect("valid marker"),
        placement: Placement::After(literal(pattern, Occurrence::First)),
        replacement: replacement.to_string(),
    }
}

/// Scratch directory for documents and plan files.
pub struct ScratchDir {
    dir: tempfile::TempDir,
}

impl ScratchDir {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create tempdir")?;
        Ok(Self { dir })
    }

    /// Absolute path for `name` inside the scratch directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Create `name` with `content` and return its path.
    pub fn write(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.path(name);
        fs::write(&path, content).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    pub fn read(&self, name: &str) -> Result<String> {
        let path = self.path(name);
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
    }
}
