//! Document grammar for tasl: front matter, include directives, guide
//! scanning, and asset references.
//!
//! This crate knows how tasl documents are shaped but nothing about topic
//! pairs on disk; `tasl-topics` builds the pair lifecycle on top of it.
//!
//! # Modules
//!
//! - [`markdown`]: Document grammar
//!   - [`markdown::frontmatter`]: YAML front matter read/merge/write
//!   - [`markdown::directive`]: Line-level grammar (includes, fences, headers)
//!   - [`markdown::scanner`]: Guide document block scanning
//!   - [`markdown::assets`]: Asset reference extraction and copying
//!
//! # Example
//!
//! ```rust
//! use std::path::Path;
//! use tasl_content::FrontMatterDoc;
//!
//! let doc = FrontMatterDoc::parse("---\ntitle: Hello\n---\n\nBody", Path::new("hello.qmd")).unwrap();
//! assert_eq!(doc.get_str("title"), Some("Hello"));
//! assert_eq!(doc.body(), "\nBody");
//! ```

pub mod markdown;

// Re-export commonly used types
pub use markdown::{
    AssetReference, Block, BlockScanner, CopySummary, FrontMatterDoc,
    ScannedDocument, copy_assets, extract_assets, header_name, include_target, is_fence,
    render_header, render_include,
};

// Re-export the mapping type front matter is parsed into
pub use serde_yaml::{Mapping, Value};
