//! Development-time tracing for debugging discovery and runner invocations.
//!
//! # Separation of Concerns
//!
//! - **Tracing (this module)**: Dev diagnostics via `RUST_LOG`, output to stderr.
//!   Not part of the command's product output.
//!
//! - **Console reporting (`report`)**: Menus, banners, and result tables on
//!   stdout. Always printed, unaffected by `RUST_LOG`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Directive used when `RUST_LOG` is unset.
///
/// `--detailed` runs also surface this crate's `info` events (package and
/// suite outcomes); everything else stays at `warn`.
pub fn default_directive(detailed: bool) -> &'static str {
    if detailed {
        "warn,package_tester=info"
    } else {
        "warn"
    }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins over [`default_directive`]. Output goes to stderr in
/// compact format so it never mixes with runner output on stdout.
///
/// # Example
/// ```bash
/// RUST_LOG=package_tester=debug package-tester --all
/// ```
pub fn init(detailed: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(detailed)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact().with_target(false))
        .init();
}
