//! Idempotency guard: has a step's effect already been applied?

use regex::Regex;

use crate::core::error::PatternError;

/// Marker declared by each step, true after (and only after) the step has
/// applied. The driver consults it before locating anything, so re-running a
/// plan against an already-patched document is a no-op.
#[derive(Debug, Clone)]
pub enum Marker {
    /// Applied once the document contains this substring.
    Contains(String),
    /// Applied once this substring is gone (guards removal steps).
    Absent(String),
    /// Applied once this regex matches.
    Matches(Regex),
}

impl Marker {
    pub fn contains(text: impl Into<String>) -> Result<Self, PatternError> {
        let text = text.into();
        if text.is_empty() {
            return Err(PatternError::Empty);
        }
        Ok(Marker::Contains(text))
    }

    pub fn absent(text: impl Into<String>) -> Result<Self, PatternError> {
        let text = text.into();
        if text.is_empty() {
            return Err(PatternError::Empty);
        }
        Ok(Marker::Absent(text))
    }

    pub fn matches(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }
        Ok(Marker::Matches(Regex::new(pattern)?))
    }

    /// True if the step's effect is already present in `content`.
    pub fn is_applied(&self, content: &str) -> bool {
        match self {
            Marker::Contains(text) => content.contains(text.as_str()),
            Marker::Absent(text) => !content.contains(text.as_str()),
            Marker::Matches(regex) => regex.is_match(content),
        }
    }
}
