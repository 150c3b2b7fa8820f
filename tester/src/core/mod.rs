//! Deterministic, pure logic shared by discovery and orchestration.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod aggregate;
pub mod command;
pub mod merge;
pub mod naming;
pub mod suite;
pub mod types;
