//! Asset references and asset copying.
//!
//! An asset reference is any substring that starts with `assets/` and runs
//! until a `"`, a `)`, or the end of the line. This is a plain text match,
//! so it finds references in markdown images, HTML attributes and shortcodes
//! alike:
//!
//! ```rust
//! use tasl_content::markdown::assets::extract_assets;
//!
//! let text = "![](assets/img/a.png)\n<img src=\"assets/b.svg\">";
//! let refs: Vec<_> = extract_assets(text).iter().map(|r| r.to_string()).collect();
//! assert_eq!(refs, vec!["assets/img/a.png", "assets/b.svg"]);
//! ```

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tasl_core::util::files::copy_with_metadata;
use tasl_core::{Error, Reporter};

/// Directory prefix every asset reference starts with.
pub const ASSET_PREFIX: &str = "assets/";

static ASSET_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"assets/[^")\r\n]+"#).expect("Invalid asset reference regex"));

/// A relative asset path found in document text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetReference(String);

impl AssetReference {
    /// The reference as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The reference as a relative path.
    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// Whether the path stays below the directory it is resolved against.
    pub fn is_contained(&self) -> bool {
        self.as_path()
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    }
}

impl fmt::Display for AssetReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Find every asset reference in `text`, in order of appearance.
///
/// Duplicates are kept; trailing whitespace is not part of a reference.
pub fn extract_assets(text: &str) -> Vec<AssetReference> {
    ASSET_REF
        .find_iter(text)
        .map(|m| m.as_str().trim_end())
        .filter(|s| s.len() > ASSET_PREFIX.len())
        .map(|s| AssetReference(s.to_string()))
        .collect()
}

/// What happened to each asset during [`copy_assets`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopySummary {
    /// Targets written.
    pub copied: Vec<PathBuf>,
    /// Sources that would be copied (dry run).
    pub planned: Vec<PathBuf>,
    /// Targets left alone because they already exist.
    pub skipped: Vec<PathBuf>,
    /// Sources that do not exist or lie outside the source root.
    pub missing: Vec<PathBuf>,
    /// Targets whose copy failed.
    pub failed: Vec<PathBuf>,
}

/// Copy referenced assets from `source_root` into `destination`.
///
/// Each reference keeps its relative layout: `assets/img/a.png` lands at
/// `destination/assets/img/a.png`. Missing sources, references that climb
/// out with `..`, existing targets (unless `overwrite`) and failed copies are
/// reported and skipped. When `perform`
/// is false nothing is written; found sources are only reported.
pub fn copy_assets(
    source_root: &Path,
    destination: &Path,
    refs: &[AssetReference],
    overwrite: bool,
    perform: bool,
    reporter: &dyn Reporter,
) -> CopySummary {
    let mut summary = CopySummary::default();
    let mut seen: Vec<&AssetReference> = Vec::new();

    for reference in refs {
        if seen.contains(&reference) {
            continue;
        }
        seen.push(reference);

        let source = source_root.join(reference.as_path());
        if !reference.is_contained() {
            reporter.warn(&format!("Asset outside {}: {reference}", source_root.display()));
            summary.missing.push(source);
            continue;
        }
        if !source.is_file() {
            reporter.warn(&format!("Asset not found: {}", source.display()));
            summary.missing.push(source);
            continue;
        }

        let target = destination.join(reference.as_path());
        if !perform {
            reporter.info(&format!("Found asset {}", source.display()));
            summary.planned.push(source);
            continue;
        }

        match copy_with_metadata(&source, &target, overwrite) {
            Ok(()) => {
                reporter.info(&format!("Copied {} to {}", source.display(), target.display()));
                summary.copied.push(target);
            }
            Err(Error::WriteConflict { path }) => {
                reporter.warn(&format!(
                    "Asset {} already exists, not copied. Use --overwrite",
                    path.display()
                ));
                summary.skipped.push(path);
            }
            Err(e) => {
                reporter.error(&format!("Failed to copy {}: {e}", source.display()));
                summary.failed.push(target);
            }
        }
    }

    summary
}
