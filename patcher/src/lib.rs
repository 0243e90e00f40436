//! Idempotent, anchor-based text file patching.
//!
//! This crate applies ordered, guarded transform steps to text documents
//! (HTML, CSS, anything textual): each step checks an idempotency marker,
//! locates a region via anchors, and rewrites only that region, so re-running
//! a plan against an already-patched file is a safe no-op. The architecture
//! enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (anchor resolution, guards,
//!   splicing, reports). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (document load/store, plan files).
//!   Isolated so driver logic stays deterministic.
//!
//! Orchestration ([`run`]) coordinates core logic with I/O to implement CLI
//! commands.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod run;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
