//! YAML front matter reading, merging, and writing.
//!
//! Front matter is the metadata block at the top of a wrapper document,
//! delimited by two lines consisting only of `---`:
//!
//! ```markdown
//! ---
//! title: Linear Models
//! tags:
//!   - regression
//! ---
//!
//! {{< include '_linear-models.qmd' >}}
//! ```
//!
//! Unlike a lenient extractor, every operation here requires the block to be
//! present: a missing or unterminated block is [`Error::MalformedHeader`].
//! Writing replaces only the delimited region; every byte before and after
//! it is preserved.
//!
//! # Usage
//!
//! ```rust
//! use std::path::Path;
//! use tasl_content::markdown::frontmatter::FrontMatterDoc;
//!
//! let doc = FrontMatterDoc::parse("---\nauthor: ann\ntitle: Intro\n---\nBody\n", Path::new("intro.qmd")).unwrap();
//! assert_eq!(doc.get_str("title"), Some("Intro"));
//!
//! // `title` always comes first when rendered
//! assert_eq!(doc.render().unwrap(), "---\ntitle: Intro\nauthor: ann\n---\nBody\n");
//! ```

use std::path::Path;

use serde_yaml::{Mapping, Value};
use tasl_core::util::files::write_atomic;
use tasl_core::{Error, Result};

/// Line that opens and closes a front-matter block.
pub const DELIMITER: &str = "---";

/// Key that is always written first.
pub const TITLE_KEY: &str = "title";

/// Byte offsets of a front-matter block inside a document.
///
/// `start..end` covers both delimiter lines (including the closing line's
/// newline, if any); `body_start..body_end` covers the YAML between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderSpan {
    /// Offset of the opening delimiter line.
    pub start: usize,
    /// Offset of the first YAML byte.
    pub body_start: usize,
    /// Offset just past the last YAML byte.
    pub body_end: usize,
    /// Offset just past the closing delimiter line.
    pub end: usize,
}

/// Find the opening `---` line and the next `---`-only line after it.
///
/// Only blank lines and comment lines (`% ...`, `<!-- ... -->`) may come
/// before the opening delimiter, so horizontal rules further down a
/// document are never taken for front matter.
///
/// Returns a description of what is missing when the block cannot be found.
///
/// # Example
///
/// ```rust
/// use tasl_content::markdown::frontmatter::locate_header;
///
/// let span = locate_header("---\na: 1\n---\nrest").unwrap();
/// assert_eq!(span.start, 0);
/// assert_eq!(&"---\na: 1\n---\nrest"[span.body_start..span.body_end], "a: 1\n");
/// assert!(locate_header("no header").is_err());
/// assert!(locate_header("text\n---\na: 1\n---\n").is_err());
/// ```
pub fn locate_header(content: &str) -> std::result::Result<HeaderSpan, &'static str> {
    let mut offset = 0;
    let mut opening: Option<(usize, usize)> = None;
    let mut in_comment = false;

    for line in content.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        if let Some((start, body_start)) = opening {
            if is_delimiter(line) {
                return Ok(HeaderSpan {
                    start,
                    body_start,
                    body_end: line_start,
                    end: offset,
                });
            }
            continue;
        }

        if in_comment {
            in_comment = !line.contains("-->");
        } else if is_delimiter(line) {
            opening = Some((line_start, offset));
        } else if !may_precede_header(line, &mut in_comment) {
            break;
        }
    }

    match opening {
        None => Err("no opening `---` delimiter"),
        Some(_) => Err("no closing `---` delimiter"),
    }
}

fn may_precede_header(line: &str, in_comment: &mut bool) -> bool {
    let line = line.trim();
    if line.is_empty() || line.starts_with('%') {
        return true;
    }
    match line.strip_prefix("<!--") {
        Some(rest) => {
            *in_comment = !rest.contains("-->");
            true
        }
        None => false,
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r']).trim_end() == DELIMITER
}

/// Serialize a mapping as a complete front-matter block, delimiters included.
///
/// `title` is moved to the front; all other keys keep their order.
///
/// # Example
///
/// ```rust
/// use serde_yaml::{Mapping, Value};
/// use tasl_content::markdown::frontmatter::render_header;
///
/// let mut mapping = Mapping::new();
/// mapping.insert(Value::from("source"), Value::from("guide.qmd"));
/// mapping.insert(Value::from("title"), Value::from("Intro"));
/// assert_eq!(render_header(&mapping).unwrap(), "---\ntitle: Intro\nsource: guide.qmd\n---\n");
/// ```
pub fn render_header(mapping: &Mapping) -> Result<String> {
    let ordered = title_first(mapping);
    let yaml = if ordered.is_empty() {
        String::new()
    } else {
        serde_yaml::to_string(&ordered)
            .map_err(|e| Error::parse(format!("Failed to serialize front matter: {e}")))?
    };
    Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n"))
}

fn title_first(mapping: &Mapping) -> Mapping {
    let mut ordered = Mapping::with_capacity(mapping.len());
    if let Some(title) = mapping.get(TITLE_KEY) {
        ordered.insert(Value::from(TITLE_KEY), title.clone());
    }
    for (key, value) in mapping {
        if key.as_str() != Some(TITLE_KEY) {
            ordered.insert(key.clone(), value.clone());
        }
    }
    ordered
}

/// A document together with its parsed front matter.
#[derive(Debug, Clone)]
pub struct FrontMatterDoc {
    content: String,
    span: HeaderSpan,
    mapping: Mapping,
}

impl FrontMatterDoc {
    /// Parse `content`; `origin` is only used for error messages.
    pub fn parse(content: impl Into<String>, origin: &Path) -> Result<Self> {
        let content = content.into();
        let span = locate_header(&content).map_err(|reason| Error::malformed_header(origin, reason))?;
        let yaml = &content[span.body_start..span.body_end];

        let mapping = if yaml.trim().is_empty() {
            Mapping::new()
        } else {
            match serde_yaml::from_str::<Value>(yaml) {
                Ok(Value::Mapping(mapping)) => mapping,
                Ok(Value::Null) => Mapping::new(),
                Ok(_) => {
                    return Err(Error::malformed_header(
                        origin,
                        "front matter is not a key/value mapping",
                    ));
                }
                Err(e) => {
                    return Err(Error::malformed_header(origin, format!("invalid YAML: {e}")));
                }
            }
        };

        Ok(Self {
            content,
            span,
            mapping,
        })
    }

    /// Read and parse the document at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        Self::parse(content, path)
    }

    /// The parsed front matter.
    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    /// Mutable access to the front matter.
    pub fn mapping_mut(&mut self) -> &mut Mapping {
        &mut self.mapping
    }

    /// Consume the document, keeping only its front matter.
    pub fn into_mapping(self) -> Mapping {
        self.mapping
    }

    /// Get a string field from the front matter.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.mapping.get(key)?.as_str()
    }

    /// Text before the front-matter block.
    pub fn preamble(&self) -> &str {
        &self.content[..self.span.start]
    }

    /// Text after the front-matter block.
    pub fn body(&self) -> &str {
        &self.content[self.span.end..]
    }

    /// The full document with the header region re-rendered from the
    /// current mapping.
    pub fn render(&self) -> Result<String> {
        Ok(format!(
            "{}{}{}",
            self.preamble(),
            render_header(&self.mapping)?,
            self.body()
        ))
    }

    /// Atomically write the rendered document to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_atomic(path, &self.render()?)
    }
}

/// Read the front matter of the document at `path`.
pub fn read(path: &Path) -> Result<Mapping> {
    FrontMatterDoc::load(path).map(FrontMatterDoc::into_mapping)
}

/// Replace the front matter of the document at `path` with `mapping`.
///
/// The document must already contain a front-matter block.
pub fn write(path: &Path, mapping: &Mapping) -> Result<()> {
    let mut doc = FrontMatterDoc::load(path)?;
    *doc.mapping_mut() = mapping.clone();
    doc.save(path)
}

/// Apply an in-place edit to the front matter of the document at `path`.
pub fn update<F>(path: &Path, edit: F) -> Result<()>
where
    F: FnOnce(&mut Mapping),
{
    let mut doc = FrontMatterDoc::load(path)?;
    edit(doc.mapping_mut());
    doc.save(path)
}

/// Shallow-merge `updates` into the front matter of the document at `path`.
///
/// Each key in `updates` replaces the existing value for that key (no deep
/// merge); existing keys keep their position.
pub fn merge(path: &Path, updates: &Mapping) -> Result<()> {
    update(path, |mapping| {
        for (key, value) in updates {
            mapping.insert(key.clone(), value.clone());
        }
    })
}

// ============================================================================
// Tests
// ============================================================================
