//! Utility modules for file operations, path handling, and name
//! sanitizing.
//!
//! # Modules
//!
//! - [`files`]: Atomic writes and metadata-preserving copies
//! - [`ids`]: Topic name sanitizing
//! - [`paths`]: Generic path utilities (tilde expansion, VCS root discovery, relocation)

pub mod files;
pub mod ids;
pub mod paths;
