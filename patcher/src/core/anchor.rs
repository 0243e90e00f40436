//! Anchor resolution: locate a position or range in a document by pattern.

use regex::Regex;

use crate::core::error::{PatternError, StepError};

/// Resolved anchor match: byte range plus the matched text for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Which occurrence to use when a pattern matches more than once.
///
/// There is no implicit choice: `Only` demands a unique match and the other
/// variants name the occurrence explicitly. `Nth` is 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    First,
    Last,
    Nth(usize),
    Only,
}

/// Pattern evaluated against a document snapshot.
#[derive(Debug, Clone)]
pub enum Pattern {
    Literal(String),
    Regex(Regex),
}

impl Pattern {
    /// Source text of the pattern, for report lines and errors.
    pub fn describe(&self) -> &str {
        match self {
            Pattern::Literal(text) => text,
            Pattern::Regex(regex) => regex.as_str(),
        }
    }
}

/// A pattern plus an explicit disambiguation rule.
///
/// Anchors are stateless descriptors; resolving one never mutates anything.
#[derive(Debug, Clone)]
pub struct Anchor {
    pattern: Pattern,
    occurrence: Occurrence,
}

impl Anchor {
    /// Literal-substring anchor. Empty patterns are rejected.
    pub fn literal(
        pattern: impl Into<String>,
        occurrence: Occurrence,
    ) -> Result<Self, PatternError> {
        let pattern = pattern.into();
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }
        Ok(Self {
            pattern: Pattern::Literal(pattern),
            occurrence,
        })
    }

    /// Regex anchor. The pattern must be non-empty and compile.
    pub fn regex(pattern: &str, occurrence: Occurrence) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }
        Ok(Self {
            pattern: Pattern::Regex(Regex::new(pattern)?),
            occurrence,
        })
    }

    pub fn describe(&self) -> &str {
        self.pattern.describe()
    }

    /// Resolve against `content`, honoring the occurrence rule.
    ///
    /// `Nth` beyond the match count is reported as not found, like zero
    /// matches.
    pub fn resolve(&self, content: &str) -> Result<Span, StepError> {
        let mut matches = self.matches(content);
        let not_found = || StepError::AnchorNotFound {
            pattern: self.describe().to_string(),
        };
        match self.occurrence {
            Occurrence::First => matches.into_iter().next().ok_or_else(not_found),
            Occurrence::Last => matches.pop().ok_or_else(not_found),
            Occurrence::Nth(n) => {
                if n == 0 || n > matches.len() {
                    return Err(not_found());
                }
                Ok(matches.swap_remove(n - 1))
            }
            Occurrence::Only => {
                if matches.len() > 1 {
                    return Err(StepError::AnchorAmbiguous {
                        pattern: self.describe().to_string(),
                        count: matches.len(),
                    });
                }
                matches.pop().ok_or_else(not_found)
            }
        }
    }

    /// All non-overlapping matches in document order.
    fn matches(&self, content: &str) -> Vec<Span> {
        match &self.pattern {
            Pattern::Literal(needle) => content
                .match_indices(needle.as_str())
                .map(|(start, text)| Span {
                    start,
                    end: start + text.len(),
                    text: text.to_string(),
                })
                .collect(),
            Pattern::Regex(regex) => regex
                .find_iter(content)
                .map(|found| Span {
                    start: found.start(),
                    end: found.end(),
                    text: found.as_str().to_string(),
                })
                .collect(),
        }
    }
}
