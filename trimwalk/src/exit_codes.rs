//! Stable exit codes for trimwalk CLI commands.

/// Command succeeded; with `--check`, nothing needed trimming.
pub const OK: i32 = 0;
/// Command failed due to invalid config, unreadable or unparsable input, or other errors.
pub const INVALID: i32 = 1;
/// `trimwalk trim --check` found text that would be rewritten.
pub const CHANGED: i32 = 2;
