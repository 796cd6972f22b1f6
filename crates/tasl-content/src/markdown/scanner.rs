//! Splitting a guide document into named blocks.
//!
//! A guide is one long document holding many topics, each introduced by a
//! level-1 header. [`BlockScanner`] walks the guide line by line with a
//! two-state machine:
//!
//! - `InText` (initial): `# Name` closes the current block and opens block
//!   `Name`; include directives are recorded as cross-references.
//! - `InLiteral`: entered and left by fence lines; header-like lines are not
//!   boundaries.
//!
//! Fence lines and header lines are consumed. Lines before the first header
//! form the `prefix` block, which never becomes a topic.
//!
//! # Example
//!
//! ```rust
//! use tasl_content::markdown::scanner::BlockScanner;
//!
//! let guide = "intro\n# One\nfirst\n# Two\n```\n# not a header\n```\nsecond\n";
//! let doc = BlockScanner::new().scan_str(guide);
//!
//! assert_eq!(doc.prefix, vec!["intro"]);
//! assert_eq!(doc.names(), vec!["One", "Two"]);
//! assert_eq!(doc.block("Two").unwrap().lines, vec!["second"]);
//! ```

use std::path::Path;

use tasl_core::{Error, Result};

use super::directive::{header_name, include_target, is_fence};

/// A named run of lines from a guide document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Header text, trimmed.
    pub name: String,
    /// Lines after the header, without line terminators.
    pub lines: Vec<String>,
}

impl Block {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            lines: Vec::new(),
        }
    }

    /// The block's lines joined with newlines.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Result of scanning a guide document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedDocument {
    /// Lines before the first header.
    pub prefix: Vec<String>,
    /// Blocks in order of first appearance.
    pub blocks: Vec<Block>,
    /// Include targets found outside literal regions, de-duplicated, in
    /// order of first appearance.
    pub references: Vec<String>,
}

impl ScannedDocument {
    /// Look up a block by name.
    pub fn block(&self, name: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.name == name)
    }

    /// Block names in document order.
    pub fn names(&self) -> Vec<&str> {
        self.blocks.iter().map(|b| b.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    InText,
    InLiteral,
}

impl ScanState {
    fn toggled(self) -> Self {
        match self {
            ScanState::InText => ScanState::InLiteral,
            ScanState::InLiteral => ScanState::InText,
        }
    }
}

/// Splits guide documents into [`Block`]s.
#[derive(Debug, Clone, Default)]
pub struct BlockScanner {
    keep_literal_lines: bool,
}

impl BlockScanner {
    /// Create a scanner that drops the contents of literal regions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep lines inside literal regions as ordinary block content.
    ///
    /// Fence lines themselves are still consumed.
    pub fn keep_literal_lines(mut self, keep: bool) -> Self {
        self.keep_literal_lines = keep;
        self
    }

    /// Scan a guide document held in memory.
    pub fn scan_str(&self, text: &str) -> ScannedDocument {
        let mut doc = ScannedDocument::default();
        let mut state = ScanState::InText;
        // `None` while still in the prefix block
        let mut current: Option<usize> = None;

        for line in text.lines() {
            if is_fence(line) {
                state = state.toggled();
                continue;
            }

            if state == ScanState::InText {
                if let Some(name) = header_name(line) {
                    current = Some(match doc.blocks.iter().position(|b| b.name == name) {
                        Some(index) => {
                            log::debug!("Block '{name}' appears more than once; appending");
                            index
                        }
                        None => {
                            doc.blocks.push(Block::new(name));
                            doc.blocks.len() - 1
                        }
                    });
                    continue;
                }

                if let Some(target) = include_target(line) {
                    if !doc.references.iter().any(|r| r == target) {
                        doc.references.push(target.to_string());
                    }
                }
            } else if !self.keep_literal_lines {
                continue;
            }

            let lines = match current {
                Some(index) => &mut doc.blocks[index].lines,
                None => &mut doc.prefix,
            };
            lines.push(line.to_string());
        }

        if state == ScanState::InLiteral {
            log::warn!("Guide ends inside a literal region; fence never closed");
        }
        doc
    }

    /// Scan the guide document at `path`.
    ///
    /// Fails with [`Error::UnreadableSource`] if the file cannot be read or
    /// is not valid UTF-8; no partial result is returned.
    pub fn scan_file(&self, path: &Path) -> Result<ScannedDocument> {
        let bytes = std::fs::read(path).map_err(|e| Error::unreadable_source(e, path))?;
        let text = String::from_utf8(bytes).map_err(|e| {
            Error::unreadable_source(
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
                path,
            )
        })?;
        Ok(self.scan_str(&text))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // ------------------------------------------------------------------------
    // Block boundaries
    // ------------------------------------------------------------------------

    #[test]
    fn test_fenced_header_is_not_a_boundary() {
        let text = "a\nb\n# Topic One\nline1\n# Topic Two\n```\n# not a header\n```\nline2\n";
        let doc = BlockScanner::new().scan_str(text);

        assert_eq!(doc.prefix, lines(&["a", "b"]));
        assert_eq!(doc.names(), vec!["Topic One", "Topic Two"]);
        assert_eq!(doc.block("Topic One").unwrap().lines, lines(&["line1"]));
        assert_eq!(doc.block("Topic Two").unwrap().lines, lines(&["line2"]));
    }

    #[test]
    fn test_keep_literal_lines() {
        let text = "# Code\n```python\n# comment\nx = 1\n```\nafter\n";
        let doc = BlockScanner::new().keep_literal_lines(true).scan_str(text);

        assert_eq!(doc.names(), vec!["Code"]);
        assert_eq!(
            doc.block("Code").unwrap().lines,
            lines(&["# comment", "x = 1", "after"])
        );
    }

    #[test]
    fn test_no_headers_everything_is_prefix() {
        let doc = BlockScanner::new().scan_str("just\ntext\n");
        assert_eq!(doc.prefix, lines(&["just", "text"]));
        assert!(doc.blocks.is_empty());
    }

    #[test]
    fn test_empty_document() {
        let doc = BlockScanner::new().scan_str("");
        assert_eq!(doc, ScannedDocument::default());
    }

    #[test]
    fn test_deeper_headers_stay_in_block() {
        let doc = BlockScanner::new().scan_str("# Top\n## Slide\ntext\n");
        assert_eq!(doc.block("Top").unwrap().lines, lines(&["## Slide", "text"]));
    }

    #[test]
    fn test_empty_block_is_kept() {
        let doc = BlockScanner::new().scan_str("# Empty\n# Full\nx\n");
        assert_eq!(doc.names(), vec!["Empty", "Full"]);
        assert!(doc.block("Empty").unwrap().lines.is_empty());
    }

    #[test]
    fn test_repeated_header_appends() {
        let doc = BlockScanner::new().scan_str("# A\none\n# B\ntwo\n# A\nthree\n");
        assert_eq!(doc.names(), vec!["A", "B"]);
        assert_eq!(doc.block("A").unwrap().lines, lines(&["one", "three"]));
    }

    #[test]
    fn test_unclosed_fence_swallows_rest() {
        let doc = BlockScanner::new().scan_str("# A\nx\n```\n# B\ny\n");
        assert_eq!(doc.names(), vec!["A"]);
        assert_eq!(doc.block("A").unwrap().lines, lines(&["x"]));
    }

    #[test]
    fn test_crlf_lines() {
        let doc = BlockScanner::new().scan_str("pre\r\n# A\r\nx\r\n");
        assert_eq!(doc.prefix, lines(&["pre"]));
        assert_eq!(doc.block("A").unwrap().lines, lines(&["x"]));
    }

    // ------------------------------------------------------------------------
    // Cross-references
    // ------------------------------------------------------------------------

    #[test]
    fn test_references_collected_and_deduplicated() {
        let text = "{{< include '_setup.qmd' >}}\n# A\n{{< include \"_x.qmd\" >}}\n# B\n{{< include _setup.qmd >}}\n";
        let doc = BlockScanner::new().scan_str(text);
        assert_eq!(doc.references, lines(&["_setup.qmd", "_x.qmd"]));
    }

    #[test]
    fn test_references_inside_literal_ignored() {
        let text = "# A\n```\n{{< include '_hidden.qmd' >}}\n```\n";
        let doc = BlockScanner::new().keep_literal_lines(true).scan_str(text);
        assert!(doc.references.is_empty());
        assert_eq!(doc.block("A").unwrap().lines, lines(&["{{< include '_hidden.qmd' >}}"]));
    }

    #[test]
    fn test_include_lines_remain_block_content() {
        let doc = BlockScanner::new().scan_str("# A\n{{< include '_x.qmd' >}}\n");
        assert_eq!(doc.block("A").unwrap().lines, lines(&["{{< include '_x.qmd' >}}"]));
    }

    // ------------------------------------------------------------------------
    // Files
    // ------------------------------------------------------------------------

    #[test]
    fn test_scan_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("guide.qmd");
        std::fs::write(&path, "# A\nx\n").unwrap();

        let doc = BlockScanner::new().scan_file(&path).unwrap();
        assert_eq!(doc.names(), vec!["A"]);
    }

    #[test]
    fn test_scan_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = BlockScanner::new()
            .scan_file(&dir.path().join("absent.qmd"))
            .unwrap_err();
        assert!(matches!(err, Error::UnreadableSource { .. }));
    }

    #[test]
    fn test_scan_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("binary.qmd");
        std::fs::write(&path, [0xffu8, 0xfe, b'#']).unwrap();

        let err = BlockScanner::new().scan_file(&path).unwrap_err();
        assert!(matches!(err, Error::UnreadableSource { .. }));
    }
}
