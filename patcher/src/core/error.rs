//! Typed failure taxonomy for transform steps.

use serde::Serialize;
use thiserror::Error;

/// Recoverable, per-step failures.
///
/// A `StepError` marks one step `failed` in the report and the run moves on
/// to the next step. Whole-run failures are
/// [`StorageError`](crate::io::document::StorageError).
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepError {
    /// The pattern had no usable match in the current document.
    #[error("anchor `{pattern}` not found")]
    AnchorNotFound { pattern: String },

    /// The anchor required exactly one match but found several.
    #[error("anchor `{pattern}` matched {count} times, expected exactly one")]
    AnchorAmbiguous { pattern: String, count: usize },

    /// The resolved range does not fit the current document.
    ///
    /// Raised instead of clamping, so two anchors resolved against different
    /// snapshots can never silently truncate content.
    #[error("invalid range {start}..{end} for document of {len} bytes")]
    InvalidRange { start: usize, end: usize, len: usize },
}

/// Errors constructing an anchor or marker pattern.
///
/// These are caught when a plan is built, before any document is touched.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("pattern must be non-empty")]
    Empty,

    #[error("invalid regex: {0}")]
    Regex(#[from] regex::Error),
}
