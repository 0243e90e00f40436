//! A guarded, idempotent, anchor-based edit.

use crate::core::anchor::Anchor;
use crate::core::error::StepError;
use crate::core::guard::Marker;
use crate::core::splice::splice;

/// How a step's anchors resolve to the byte range it rewrites.
#[derive(Debug, Clone)]
pub enum Placement {
    /// Insert immediately before the anchor match.
    Before(Anchor),
    /// Insert immediately after the anchor match.
    After(Anchor),
    /// Replace the anchor match itself.
    Replace(Anchor),
    /// Replace from the start of `from`'s match through the end of `to`'s
    /// match. Both anchors resolve against the same snapshot; if they come
    /// back out of order the step fails with `InvalidRange` instead of
    /// truncating.
    Span { from: Anchor, to: Anchor },
}

impl Placement {
    /// Resolve to the `(start, end)` byte range the rewrite will replace.
    pub fn resolve(&self, content: &str) -> Result<(usize, usize), StepError> {
        match self {
            Placement::Before(anchor) => {
                let found = anchor.resolve(content)?;
                Ok((found.start, found.start))
            }
            Placement::After(anchor) => {
                let found = anchor.resolve(content)?;
                Ok((found.end, found.end))
            }
            Placement::Replace(anchor) => {
                let found = anchor.resolve(content)?;
                Ok((found.start, found.end))
            }
            Placement::Span { from, to } => {
                let from = from.resolve(content)?;
                let to = to.resolve(content)?;
                Ok((from.start, to.end))
            }
        }
    }
}

/// One named transform: guard, locate, rewrite.
#[derive(Debug, Clone)]
pub struct TransformStep {
    pub name: String,
    pub marker: Marker,
    pub placement: Placement,
    pub replacement: String,
}

/// What applying a step to a document snapshot produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepEffect {
    /// The marker was already present; nothing to do.
    AlreadyApplied,
    /// The step fired; carries the new document content.
    Rewritten(String),
    /// Anchors did not resolve; the document is unchanged.
    NotApplicable(StepError),
}

impl TransformStep {
    /// Guard, locate, rewrite against one snapshot.
    ///
    /// Applying the result a second time yields `AlreadyApplied` as long as
    /// the step's marker holds its contract (true only after application).
    pub fn apply(&self, content: &str) -> StepEffect {
        if self.marker.is_applied(content) {
            return StepEffect::AlreadyApplied;
        }
        let rewritten = self
            .placement
            .resolve(content)
            .and_then(|(start, end)| splice(content, start, end, &self.replacement));
        match rewritten {
            Ok(next) => StepEffect::Rewritten(next),
            Err(err) => StepEffect::NotApplicable(err),
        }
    }
}
