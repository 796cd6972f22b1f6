//! Shared types, errors, reporting, and file utilities for tasl.
//!
//! This crate provides the foundational types used across all tasl crates.
//! It has no internal tasl dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`reporter`]: User-facing progress reporting
//! - [`util`]: File, path, and name utilities

pub mod error;
pub mod reporter;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use reporter::{LogReporter, RecordingReporter, Reporter, Severity};

// Convenience re-exports from util
pub use util::ids::clean_topic_name;
