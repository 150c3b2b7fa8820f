//! Discovery and test orchestration for installed packages.
//!
//! Packages come from two sources: the central manifest
//! (`.package-tester/config.json`) and `package-tester.json` files that
//! dependencies ship themselves. The two are merged into one registry, and
//! each package's suites are handed to an external runner executable one at a
//! time. The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (normalization, merging, argument
//!   building, status folding). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (filesystem reads and scans, runner
//!   location, process execution).
//!
//! Orchestration modules ([`discover`], [`suite_runner`], [`orchestrate`],
//! [`menu`]) coordinate core logic with I/O to implement the command.

pub mod core;
pub mod discover;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod menu;
pub mod orchestrate;
pub mod report;
pub mod suite_runner;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
