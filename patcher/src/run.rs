//! Orchestration for one driver run: load, guard/locate/rewrite, persist.

use std::path::Path;

use tracing::{debug, info};

use crate::core::report::{StepOutcome, TransformReport};
use crate::core::step::{StepEffect, TransformStep};
use crate::io::document::{Document, StorageError};

/// Options for a driver run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Compute the report without writing the document back.
    pub dry_run: bool,
}

/// Run every step, in order, against the document at `path`.
///
/// Each step sees the content produced by the steps before it. A step that
/// fails is recorded in the report and the run continues; only storage errors
/// abort. The file is rewritten (atomically, at most once) iff at least one
/// step applied and `dry_run` is off — all-skipped and all-failed runs leave
/// the backing file completely untouched.
pub fn run_plan(
    path: &Path,
    steps: &[TransformStep],
    options: RunOptions,
) -> Result<TransformReport, StorageError> {
    let mut doc = Document::load(path)?;
    let mut report = TransformReport::new(path.display().to_string());

    for step in steps {
        match step.apply(&doc.content) {
            StepEffect::AlreadyApplied => {
                debug!(step = %step.name, "marker present, skipping");
                report.record(step.name.as_str(), StepOutcome::Skipped);
            }
            StepEffect::Rewritten(next) => {
                debug!(step = %step.name, bytes = next.len(), "step applied");
                doc.content = next;
                report.record(step.name.as_str(), StepOutcome::Applied);
            }
            StepEffect::NotApplicable(error) => {
                debug!(step = %step.name, error = %error, "step failed");
                report.record(step.name.as_str(), StepOutcome::Failed { error });
            }
        }
    }

    if report.any_applied() && !options.dry_run {
        doc.store()?;
        report.written = true;
        info!(path = %path.display(), steps = report.steps.len(), "document rewritten");
    }

    Ok(report)
}
