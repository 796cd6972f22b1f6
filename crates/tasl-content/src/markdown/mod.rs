//! Document grammar for wrapper, topic, and guide files.
//!
//! - [`frontmatter`]: YAML front matter reading, merging, and writing
//! - [`directive`]: Include directives, fences, headers, title fields
//! - [`scanner`]: Splitting guide documents into named blocks
//! - [`assets`]: Asset references and asset copying
//!
//! # Example
//!
//! ```rust
//! use tasl_content::markdown::{BlockScanner, extract_assets};
//!
//! let guide = "# Plots\n![](assets/plot.png)\n";
//! let doc = BlockScanner::new().scan_str(guide);
//! let block = doc.block("Plots").unwrap();
//!
//! assert_eq!(extract_assets(&block.text())[0].as_str(), "assets/plot.png");
//! ```

pub mod assets;
pub mod directive;
pub mod frontmatter;
pub mod scanner;

// Re-export key types and functions
pub use assets::{AssetReference, CopySummary, copy_assets, extract_assets};
pub use directive::{header_name, include_target, is_fence, render_include};
pub use frontmatter::{FrontMatterDoc, render_header};
pub use scanner::{Block, BlockScanner, ScannedDocument};
