//! Stable exit codes for the `package-tester` command.
//!
//! A runner's own non-zero exit code is propagated as-is; these constants
//! cover the cases where no tool code is available.

/// Every selected package succeeded (or only produced warnings).
pub const OK: i32 = 0;
/// Generic failure: missing package, unresolvable runner, missing test path, or other errors.
pub const FAILURE: i32 = 1;
