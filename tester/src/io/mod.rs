//! I/O helpers: project layout, config, manifest and scanner reads, runner
//! location, and subprocess streaming.

pub mod config;
pub mod locate;
pub mod manifest;
pub mod paths;
pub mod process;
pub mod scanner;
