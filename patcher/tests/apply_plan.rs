//! End-to-end tests for plan loading and driver runs.
//!
//! Exercises the full parse → guard → locate → rewrite → persist path
//! against scratch files, including re-runs and anchor misses.

use patcher::core::report::StepOutcome;
use patcher::core::step::TransformStep;
use patcher::io::plan::parse_plan;
use patcher::run::{RunOptions, run_plan};
use patcher::test_support::ScratchDir;

const HEAD_LINK_PLAN: &str = r#"
[[step]]
name = "add-link"
action = "insert_before"
pattern = "</head>"
occurrence = "first"
marker = 'x"'
replacement = '<link rel="x">'
"#;

#[test]
fn guarded_insert_applies_then_skips_on_rerun() {
    let steps = parse_plan(HEAD_LINK_PLAN).expect("plan");
    let dir = ScratchDir::new().expect("scratch");
    let path = dir.write("page.html", "<head></head>").expect("write");

    let first = run_plan(&path, &steps, RunOptions::default()).expect("first run");
    assert_eq!(first.steps[0].outcome, StepOutcome::Applied);
    assert!(first.written);
    assert_eq!(
        dir.read("page.html").expect("read"),
        "<head><link rel=\"x\"></head>"
    );

    let second = run_plan(&path, &steps, RunOptions::default()).expect("second run");
    assert_eq!(second.steps[0].outcome, StepOutcome::Skipped);
    assert!(!second.written);
    assert_eq!(
        dir.read("page.html").expect("read"),
        "<head><link rel=\"x\"></head>"
    );
}

#[test]
fn anchor_miss_is_reported_and_file_is_left_alone() {
    let steps = parse_plan(HEAD_LINK_PLAN).expect("plan");
    let dir = ScratchDir::new().expect("scratch");
    let path = dir.write("page.html", "<body></body>").expect("write");

    let report = run_plan(&path, &steps, RunOptions::default()).expect("run");
    assert!(matches!(report.steps[0].outcome, StepOutcome::Failed { .. }));
    assert!(!report.written);
    assert_eq!(dir.read("page.html").expect("read"), "<body></body>");
}

#[test]
fn end_of_document_insertions_land_in_plan_order() {
    let steps = parse_plan(
        r#"
[[step]]
name = "append-a"
action = "insert_before"
pattern = "</body>"
occurrence = "last"
marker = "A!"
replacement = "A!"

[[step]]
name = "append-b"
action = "insert_before"
pattern = "</body>"
occurrence = "last"
marker = "B!"
replacement = "B!"
"#,
    )
    .expect("plan");
    let dir = ScratchDir::new().expect("scratch");
    let path = dir.write("page.html", "<body></body>").expect("write");

    let report = run_plan(&path, &steps, RunOptions::default()).expect("run");
    assert!(report.written);
    assert_eq!(dir.read("page.html").expect("read"), "<body>A!B!</body>");
}

#[test]
fn replace_span_swaps_region_between_anchors() {
    let steps = parse_plan(
        r#"
[[step]]
name = "swap-nav"
action = "replace_span"
pattern = "<aside>"
occurrence = "first"
end_pattern = "</aside>"
end_occurrence = "first"
marker = "top-nav"
replacement = '<nav class="top-nav"></nav>'
"#,
    )
    .expect("plan");
    let dir = ScratchDir::new().expect("scratch");
    let path = dir
        .write("page.html", "<body><aside>menu</aside><main></main></body>")
        .expect("write");

    run_plan(&path, &steps, RunOptions::default()).expect("run");
    assert_eq!(
        dir.read("page.html").expect("read"),
        "<body><nav class=\"top-nav\"></nav><main></main></body>"
    );
}

#[test]
fn regex_last_occurrence_targets_final_stylesheet() {
    let steps = parse_plan(
        r#"
[[step]]
name = "add-floating-css"
action = "insert_after"
pattern = '<link[^>]*rel="stylesheet"[^>]*>'
regex = true
occurrence = "last"
marker = "floating.css"
replacement = '<link rel="stylesheet" href="floating.css">'
"#,
    )
    .expect("plan");
    let dir = ScratchDir::new().expect("scratch");
    let path = dir
        .write(
            "page.html",
            concat!(
                r#"<head><link rel="stylesheet" href="a.css">"#,
                r#"<link rel="stylesheet" href="b.css"></head>"#
            ),
        )
        .expect("write");

    run_plan(&path, &steps, RunOptions::default()).expect("run");
    assert_eq!(
        dir.read("page.html").expect("read"),
        concat!(
            r#"<head><link rel="stylesheet" href="a.css">"#,
            r#"<link rel="stylesheet" href="b.css">"#,
            r#"<link rel="stylesheet" href="floating.css"></head>"#
        )
    );
}

/// Steps touching disjoint regions commute: either order yields the same
/// final content.
#[test]
fn disjoint_steps_commute() {
    let steps = parse_plan(
        r#"
[[step]]
name = "head-link"
action = "insert_before"
pattern = "</head>"
occurrence = "first"
marker = "styles.css"
replacement = '<link href="styles.css">'

[[step]]
name = "body-script"
action = "insert_before"
pattern = "</body>"
occurrence = "last"
marker = "app.js"
replacement = '<script src="app.js"></script>'
"#,
    )
    .expect("plan");
    let reversed: Vec<TransformStep> = steps.iter().rev().cloned().collect();

    let original = "<head></head><body></body>";
    let dir = ScratchDir::new().expect("scratch");
    let forward = dir.write("forward.html", original).expect("write");
    let backward = dir.write("backward.html", original).expect("write");

    run_plan(&forward, &steps, RunOptions::default()).expect("forward run");
    run_plan(&backward, &reversed, RunOptions::default()).expect("backward run");

    assert_eq!(
        dir.read("forward.html").expect("read"),
        dir.read("backward.html").expect("read")
    );
}
