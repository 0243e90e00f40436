//! Per-run, per-step outcome record.

use serde::Serialize;

use crate::core::error::StepError;

/// Outcome of one step within a driver run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum StepOutcome {
    /// The step located its anchors and rewrote the document.
    Applied,
    /// The idempotency marker was already present; nothing to do.
    Skipped,
    /// The step could not be applied; the document is unchanged.
    Failed { error: StepError },
}

/// One report line: step name plus its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: String,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

/// Record of one driver run over one document. Read-only once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformReport {
    pub path: String,
    pub steps: Vec<StepReport>,
    /// True when at least one step applied and the file was persisted.
    pub written: bool,
}

impl TransformReport {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            steps: Vec::new(),
            written: false,
        }
    }

    pub fn record(&mut self, step: impl Into<String>, outcome: StepOutcome) {
        self.steps.push(StepReport {
            step: step.into(),
            outcome,
        });
    }

    /// True if any step rewrote the document.
    pub fn any_applied(&self) -> bool {
        self.steps
            .iter()
            .any(|entry| matches!(entry.outcome, StepOutcome::Applied))
    }

    /// Human-readable form, one line per step.
    pub fn render(&self) -> String {
        let lines: Vec<String> = self
            .steps
            .iter()
            .map(|entry| match &entry.outcome {
                StepOutcome::Applied => format!("{}: {} applied", self.path, entry.step),
                StepOutcome::Skipped => {
                    format!("{}: {} skipped (already applied)", self.path, entry.step)
                }
                StepOutcome::Failed { error } => {
                    format!("{}: {} failed ({})", self.path, entry.step, error)
                }
            })
            .collect();
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_produces_one_line_per_step() {
        let mut report = TransformReport::new("templates/about.html");
        report.record("add-css", StepOutcome::Applied);
        report.record("add-js", StepOutcome::Skipped);
        report.record(
            "swap-nav",
            StepOutcome::Failed {
                error: StepError::AnchorNotFound {
                    pattern: "<aside>".to_string(),
                },
            },
        );

        let rendered = report.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "templates/about.html: add-css applied",
                "templates/about.html: add-js skipped (already applied)",
                "templates/about.html: swap-nav failed (anchor `<aside>` not found)",
            ]
        );
    }

    #[test]
    fn any_applied_requires_at_least_one_applied_step() {
        let mut report = TransformReport::new("a.html");
        report.record("s1", StepOutcome::Skipped);
        assert!(!report.any_applied());
        report.record("s2", StepOutcome::Applied);
        assert!(report.any_applied());
    }

    /// Guards the serialized shape consumed by `--json`.
    #[test]
    fn report_json_is_stable() {
        let mut report = TransformReport::new("a.html");
        report.record("s1", StepOutcome::Applied);
        report.record(
            "s2",
            StepOutcome::Failed {
                error: StepError::AnchorNotFound {
                    pattern: "x".to_string(),
                },
            },
        );

        let payload = serde_json::to_string(&report).expect("serialize report");
        assert_eq!(
            payload,
            concat!(
                r#"{"path":"a.html","steps":["#,
                r#"{"step":"s1","outcome":"applied"},"#,
                r#"{"step":"s2","outcome":"failed","error":{"anchor_not_found":{"pattern":"x"}}}"#,
                r#"],"written":false}"#
            )
        );
    }
}
