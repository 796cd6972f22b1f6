//! Loading a directory of topic pairs and filtering it by keyword and tag.
//!
//! Keywords match the topic file's content (case-insensitive substring);
//! tags come from the wrapper's front matter (case-insensitive exact match).
//! A topic is included when there are no include criteria at all, or when
//! any include keyword or any wanted tag matches. Exclusion runs afterwards
//! and wins: any exclude keyword or any unwanted tag drops the topic.

use std::path::{Path, PathBuf};

use tasl_content::{FrontMatterDoc, Mapping};
use tasl_core::{Error, Reporter, Result};

use crate::pair::{TOPIC_PREFIX, wrapper_for_topic};
use crate::tags::{TagLayout, normalize_tag};

/// One loaded topic pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicEntry {
    /// Topic file name (`_<basename>.<ext>`).
    pub filename: String,
    /// Topic file content.
    pub content: String,
    /// The wrapper's front matter.
    pub front_matter: Mapping,
    /// Tags read from `front_matter`.
    pub tags: Vec<String>,
}

impl TopicEntry {
    /// An entry whose tags are read from `front_matter` through `layout`.
    pub fn new(
        filename: impl Into<String>,
        content: impl Into<String>,
        front_matter: Mapping,
        layout: &TagLayout,
    ) -> Self {
        let tags = layout.read(&front_matter);
        Self {
            filename: filename.into(),
            content: content.into(),
            front_matter,
            tags,
        }
    }

    fn contains_keyword(&self, lowered_content: &str, keywords: &[String]) -> bool {
        keywords
            .iter()
            .any(|k| lowered_content.contains(&k.to_lowercase()))
    }

    fn has_any_tag(&self, wanted: &[String]) -> bool {
        wanted
            .iter()
            .map(|t| normalize_tag(t))
            .any(|t| self.tags.contains(&t))
    }
}

/// Selection criteria for [`TagIndex::filter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicFilter {
    /// Keywords that select a topic.
    pub include: Vec<String>,
    /// Keywords that drop a topic.
    pub exclude: Vec<String>,
    /// Tags that select a topic.
    pub with_tags: Vec<String>,
    /// Tags that drop a topic.
    pub without_tags: Vec<String>,
}

impl TopicFilter {
    /// Filter from command-line tokens (see [`categorize`]).
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S], reporter: &dyn Reporter) -> Self {
        let (include, exclude) = categorize(tokens, reporter);
        Self {
            include,
            exclude,
            ..Self::default()
        }
    }

    /// Add tags that select a topic.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.with_tags = tags;
        self
    }

    /// Add tags that drop a topic.
    pub fn without_tags(mut self, tags: Vec<String>) -> Self {
        self.without_tags = tags;
        self
    }

    fn selects_everything(&self) -> bool {
        self.include.is_empty() && self.with_tags.is_empty()
    }
}

/// Topics that passed a filter, plus the tags they carry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterResult {
    /// Matching topic file names, in index order.
    pub filenames: Vec<String>,
    /// Union of the matching topics' tags, in first-seen order.
    pub available_tags: Vec<String>,
}

/// Split filter tokens into include and exclude keywords.
///
/// `+word` includes, `-word` excludes, and a bare word includes. Tokens
/// starting with `--` are unknown options: they are reported and dropped.
pub fn categorize<S: AsRef<str>>(tokens: &[S], reporter: &dyn Reporter) -> (Vec<String>, Vec<String>) {
    let mut include = Vec::new();
    let mut exclude = Vec::new();

    for token in tokens {
        let token = token.as_ref();
        if token.starts_with("--") {
            reporter.warn(&format!("Unknown option '{token}' ignored"));
        } else if let Some(word) = token.strip_prefix('+') {
            push_word(&mut include, word);
        } else if let Some(word) = token.strip_prefix('-') {
            push_word(&mut exclude, word);
        } else {
            push_word(&mut include, token);
        }
    }

    (include, exclude)
}

fn push_word(into: &mut Vec<String>, word: &str) {
    if !word.is_empty() {
        into.push(word.to_string());
    }
}

/// A snapshot of the topic pairs in one directory.
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    dir: PathBuf,
    entries: Vec<TopicEntry>,
}

impl TagIndex {
    /// Load every complete pair in `dir` with the given extension.
    ///
    /// Only `_*.<ext>` files whose wrapper exists are considered. A file that
    /// cannot be read, or whose wrapper has no usable front matter, is
    /// reported and left out; the rest of the directory still loads.
    pub fn load(dir: &Path, extension: &str, layout: &TagLayout, reporter: &dyn Reporter) -> Result<Self> {
        let pattern = topic_pattern(dir, extension);
        let paths = glob::glob(&pattern)
            .map_err(|e| Error::parse(format!("Invalid topic pattern {pattern}: {e}")))?;

        let mut entries = Vec::new();
        for path in paths {
            let path = match path {
                Ok(path) => path,
                Err(e) => {
                    reporter.warn(&format!("Skipping unreadable entry: {e}"));
                    continue;
                }
            };
            let Some(filename) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };
            let Some(wrapper_file) = wrapper_for_topic(&filename) else {
                continue;
            };
            let wrapper = dir.join(wrapper_file);
            if !wrapper.is_file() {
                log::debug!("No wrapper for {filename}; skipping");
                continue;
            }

            match load_entry(&path, &wrapper, filename, layout) {
                Ok(entry) => entries.push(entry),
                Err(e) => reporter.warn(&format!("Skipping {}: {e}", path.display())),
            }
        }

        entries.sort_by(|a, b| a.filename.cmp(&b.filename));
        log::debug!("Loaded {} topics from {}", entries.len(), dir.display());
        Ok(Self {
            dir: dir.to_path_buf(),
            entries,
        })
    }

    /// Build an index from entries already in memory.
    pub fn from_entries(dir: impl Into<PathBuf>, entries: Vec<TopicEntry>) -> Self {
        Self {
            dir: dir.into(),
            entries,
        }
    }

    /// The directory the index was loaded from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All loaded entries.
    pub fn entries(&self) -> &[TopicEntry] {
        &self.entries
    }

    /// Number of loaded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no pairs were loaded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply `filter` and collect the tags of the survivors.
    pub fn filter(&self, filter: &TopicFilter) -> FilterResult {
        let mut result = FilterResult::default();

        for entry in &self.entries {
            let content = entry.content.to_lowercase();

            let included = filter.selects_everything()
                || entry.contains_keyword(&content, &filter.include)
                || entry.has_any_tag(&filter.with_tags);
            if !included {
                continue;
            }

            let excluded = entry.contains_keyword(&content, &filter.exclude)
                || entry.has_any_tag(&filter.without_tags);
            if excluded {
                continue;
            }

            result.filenames.push(entry.filename.clone());
            for tag in &entry.tags {
                if !result.available_tags.contains(tag) {
                    result.available_tags.push(tag.clone());
                }
            }
        }

        result
    }
}

fn topic_pattern(dir: &Path, extension: &str) -> String {
    let dir = glob::Pattern::escape(&dir.to_string_lossy());
    format!("{dir}/{TOPIC_PREFIX}*.{}", glob::Pattern::escape(extension))
}

fn load_entry(topic: &Path, wrapper: &Path, filename: String, layout: &TagLayout) -> Result<TopicEntry> {
    let content = std::fs::read_to_string(topic).map_err(|e| Error::io_with_path(e, topic))?;
    let header = FrontMatterDoc::load(wrapper)?;
    Ok(TopicEntry::new(filename, content, header.into_mapping(), layout))
}
