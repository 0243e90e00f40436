//! Stable exit codes for patcher CLI commands.

/// Command succeeded; step-level failures do not affect the exit status.
pub const OK: i32 = 0;
/// Invalid plan, unreadable/unwritable target file, or other fatal error.
pub const INVALID: i32 = 1;
/// `patcher check` found steps that would apply.
pub const PENDING: i32 = 2;
