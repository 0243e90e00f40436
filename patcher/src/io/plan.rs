//! Transform plans stored as human-edited TOML.
//!
//! A plan is an ordered list of `[[step]]` tables. Validation happens at load
//! time, before any document is touched: a plan that does not build is a
//! fatal invocation error, never a per-step failure.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use tracing::debug;

use crate::core::anchor::{Anchor, Occurrence};
use crate::core::guard::Marker;
use crate::core::step::{Placement, TransformStep};

/// Top-level plan file: an ordered list of `[[step]]` tables.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanFile {
    #[serde(default, rename = "step")]
    pub steps: Vec<StepSpec>,
}

/// One `[[step]]` table. Field defaults keep simple plans short.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepSpec {
    pub name: String,
    pub action: ActionKind,
    pub pattern: String,
    /// Treat `pattern` as a regex instead of a literal substring.
    #[serde(default)]
    pub regex: bool,
    #[serde(default)]
    pub occurrence: OccurrenceSpec,
    /// Closing anchor, `replace_span` only.
    #[serde(default)]
    pub end_pattern: Option<String>,
    #[serde(default)]
    pub end_regex: bool,
    #[serde(default)]
    pub end_occurrence: OccurrenceSpec,
    /// Applied once this substring is present.
    #[serde(default)]
    pub marker: Option<String>,
    /// Applied once this substring is gone.
    #[serde(default)]
    pub marker_absent: Option<String>,
    /// Applied once this regex matches.
    #[serde(default)]
    pub marker_matches: Option<String>,
    #[serde(default)]
    pub replacement: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    InsertBefore,
    InsertAfter,
    Replace,
    ReplaceSpan,
}

/// `"first" | "last" | "only"` or a 1-indexed integer.
///
/// Defaults to `only`, which fails loudly on ambiguity rather than picking
/// an occurrence for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OccurrenceSpec {
    Named(NamedOccurrence),
    Nth(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedOccurrence {
    First,
    Last,
    Only,
}

impl Default for OccurrenceSpec {
    fn default() -> Self {
        OccurrenceSpec::Named(NamedOccurrence::Only)
    }
}

impl OccurrenceSpec {
    fn to_occurrence(self) -> Result<Occurrence> {
        match self {
            OccurrenceSpec::Named(NamedOccurrence::First) => Ok(Occurrence::First),
            OccurrenceSpec::Named(NamedOccurrence::Last) => Ok(Occurrence::Last),
            OccurrenceSpec::Named(NamedOccurrence::Only) => Ok(Occurrence::Only),
            OccurrenceSpec::Nth(n) => {
                if n == 0 {
                    return Err(anyhow!("occurrence must be >= 1"));
                }
                Ok(Occurrence::Nth(n))
            }
        }
    }
}

/// Load a plan file and build the ordered step list.
pub fn load_plan(path: &Path) -> Result<Vec<TransformStep>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read plan {}", path.display()))?;
    let steps = parse_plan(&contents).with_context(|| format!("load plan {}", path.display()))?;
    debug!(path = %path.display(), steps = steps.len(), "plan loaded");
    Ok(steps)
}

/// Parse plan TOML and build the ordered step list.
pub fn parse_plan(contents: &str) -> Result<Vec<TransformStep>> {
    let plan: PlanFile = toml::from_str(contents).context("parse plan toml")?;
    build_steps(&plan)
}

/// Validate specs and convert into core steps.
pub fn build_steps(plan: &PlanFile) -> Result<Vec<TransformStep>> {
    if plan.steps.is_empty() {
        return Err(anyhow!("plan has no steps"));
    }
    let mut seen = HashSet::new();
    let mut steps = Vec::with_capacity(plan.steps.len());
    for spec in &plan.steps {
        let step = build_step(spec).with_context(|| format!("step '{}'", spec.name))?;
        if !seen.insert(step.name.clone()) {
            return Err(anyhow!("duplicate step name '{}'", step.name));
        }
        steps.push(step);
    }
    Ok(steps)
}

fn build_step(spec: &StepSpec) -> Result<TransformStep> {
    if spec.name.trim().is_empty() {
        return Err(anyhow!("name must be non-empty"));
    }
    let marker = build_marker(spec)?;
    let anchor = build_anchor(&spec.pattern, spec.regex, spec.occurrence).context("pattern")?;
    let placement = match spec.action {
        ActionKind::InsertBefore => {
            reject_end_pattern(spec)?;
            Placement::Before(anchor)
        }
        ActionKind::InsertAfter => {
            reject_end_pattern(spec)?;
            Placement::After(anchor)
        }
        ActionKind::Replace => {
            reject_end_pattern(spec)?;
            Placement::Replace(anchor)
        }
        ActionKind::ReplaceSpan => {
            let end_pattern = spec
                .end_pattern
                .as_deref()
                .ok_or_else(|| anyhow!("replace_span requires end_pattern"))?;
            let to = build_anchor(end_pattern, spec.end_regex, spec.end_occurrence)
                .context("end_pattern")?;
            Placement::Span { from: anchor, to }
        }
    };
    Ok(TransformStep {
        name: spec.name.clone(),
        marker,
        placement,
        replacement: spec.replacement.clone(),
    })
}

fn reject_end_pattern(spec: &StepSpec) -> Result<()> {
    if spec.end_pattern.is_some() {
        return Err(anyhow!("end_pattern is only valid with action = \"replace_span\""));
    }
    Ok(())
}

fn build_marker(spec: &StepSpec) -> Result<Marker> {
    let marker = match (&spec.marker, &spec.marker_absent, &spec.marker_matches) {
        (Some(text), None, None) => Marker::contains(text.clone())?,
        (None, Some(text), None) => Marker::absent(text.clone())?,
        (None, None, Some(pattern)) => Marker::matches(pattern)?,
        (None, None, None) => {
            return Err(anyhow!(
                "missing marker (set marker, marker_absent, or marker_matches)"
            ));
        }
        _ => {
            return Err(anyhow!(
                "set exactly one of marker, marker_absent, marker_matches"
            ));
        }
    };
    Ok(marker)
}

fn build_anchor(pattern: &str, is_regex: bool, occurrence: OccurrenceSpec) -> Result<Anchor> {
    let occurrence = occurrence.to_occurrence()?;
    let anchor = if is_regex {
        Anchor::regex(pattern, occurrence)?
    } else {
        Anchor::literal(pattern, occurrence)?
    };
    Ok(anchor)
}
