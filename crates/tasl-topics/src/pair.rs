//! Wrapper/topic file pairs and their on-disk lifecycle.
//!
//! A topic named `Linear Models` lives in two files in the same directory:
//!
//! - `linear-models.qmd`: the wrapper, holding front matter and an include
//! - `_linear-models.qmd`: the topic, holding the slides
//!
//! A pair exists only when both files exist. [`TopicStore::create`] fills in
//! whichever half is missing and never touches a half that is already there
//! unless asked to overwrite.

use std::path::{Path, PathBuf};

use tasl_content::FrontMatterDoc;
use tasl_content::Value;
use tasl_core::util::files::{write_atomic, write_new};
use tasl_core::{Error, Reporter, Result, clean_topic_name};

use crate::template::{self, Templates};

/// Prefix that marks the topic half of a pair.
pub const TOPIC_PREFIX: char = '_';

/// Extension used when none is configured.
pub const DEFAULT_EXTENSION: &str = "qmd";

/// File name of the topic half for `basename`.
pub fn topic_filename(basename: &str, extension: &str) -> String {
    format!("{TOPIC_PREFIX}{basename}.{extension}")
}

/// File name of the wrapper half for `basename`.
pub fn wrapper_filename(basename: &str, extension: &str) -> String {
    format!("{basename}.{extension}")
}

/// The wrapper file name that belongs to a topic file name.
///
/// Returns `None` when `topic_file` lacks the topic prefix.
///
/// # Example
///
/// ```
/// use tasl_topics::pair::wrapper_for_topic;
///
/// assert_eq!(wrapper_for_topic("_intro.qmd"), Some("intro.qmd"));
/// assert_eq!(wrapper_for_topic("intro.qmd"), None);
/// ```
pub fn wrapper_for_topic(topic_file: &str) -> Option<&str> {
    topic_file
        .strip_prefix(TOPIC_PREFIX)
        .filter(|rest| !rest.is_empty())
}

/// Paths of one wrapper/topic pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicPair {
    /// Sanitized basename shared by both files.
    pub basename: String,
    /// `<dir>/<basename>.<ext>`
    pub wrapper: PathBuf,
    /// `<dir>/_<basename>.<ext>`
    pub topic: PathBuf,
}

impl TopicPair {
    /// Pair for `basename` inside `dir`.
    pub fn new(dir: &Path, basename: &str, extension: &str) -> Self {
        Self {
            basename: basename.to_string(),
            wrapper: dir.join(wrapper_filename(basename, extension)),
            topic: dir.join(topic_filename(basename, extension)),
        }
    }

    /// Whether both halves are present.
    pub fn exists(&self) -> bool {
        self.wrapper.is_file() && self.topic.is_file()
    }

    /// Halves that are absent.
    pub fn missing(&self) -> Vec<PathBuf> {
        [&self.wrapper, &self.topic]
            .into_iter()
            .filter(|p| !p.is_file())
            .cloned()
            .collect()
    }

    /// File name of the topic half.
    pub fn topic_file_name(&self) -> String {
        file_name(&self.topic)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Everything needed to create one topic pair.
#[derive(Debug, Clone, Default)]
pub struct NewTopic {
    title: String,
    template: Option<String>,
    content: Option<String>,
    source: Option<String>,
    overwrite: bool,
}

impl NewTopic {
    /// A topic with the given display title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Basename of a template pair in the store's directory.
    pub fn with_template(mut self, template_base: impl Into<String>) -> Self {
        self.template = Some(template_base.into());
        self
    }

    /// Full topic-file text, replacing the default or template body.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Repo-relative path recorded as the wrapper's `source` field.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Rewrite halves that already exist.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// A directory of topic pairs sharing one file extension.
#[derive(Debug, Clone)]
pub struct TopicStore {
    dir: PathBuf,
    extension: String,
}

impl TopicStore {
    /// Store rooted at `dir` using the default extension.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Use `extension` (without the dot) for both halves.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// The directory holding the pairs.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file extension, without the dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Pair for an already-sanitized basename.
    pub fn pair(&self, basename: &str) -> TopicPair {
        TopicPair::new(&self.dir, basename, &self.extension)
    }

    /// Pair for a display title.
    pub fn pair_for_title(&self, title: &str) -> Result<TopicPair> {
        let basename = clean_topic_name(title);
        if basename.is_empty() {
            return Err(Error::invalid_topic_name(title));
        }
        Ok(self.pair(&basename))
    }

    /// Path of a file in the store's directory.
    pub fn path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// Create the wrapper and topic files for `spec`.
    ///
    /// A complete pair is left alone unless `overwrite` is set; otherwise only
    /// the missing halves are written. Each half is written independently, so
    /// a failure on one does not stop the other; the first failure is
    /// returned after both have been attempted.
    pub fn create(&self, spec: &NewTopic, reporter: &dyn Reporter) -> Result<TopicPair> {
        let pair = self.pair_for_title(&spec.title)?;

        let write_wrapper = spec.overwrite || !pair.wrapper.exists();
        let write_topic = spec.overwrite || !pair.topic.exists();
        if !write_wrapper && !write_topic {
            reporter.info(&format!(
                "Topic '{}' already exists ({}, {})",
                spec.title,
                pair.wrapper.display(),
                pair.topic.display()
            ));
            return Ok(pair);
        }

        let templates = match &spec.template {
            Some(base) => Templates::load(&self.pair(base)),
            None => Templates::default(),
        };

        let mut first_error = None;

        if write_wrapper {
            let written = self
                .wrapper_contents(spec, &pair, &templates)
                .and_then(|contents| self.write_half(&pair.wrapper, &contents, spec.overwrite, reporter));
            if let Err(e) = written {
                reporter.error(&format!("Wrapper not written: {e}"));
                first_error.get_or_insert(e);
            }
        }

        if write_topic {
            let contents = match (&spec.content, &templates.topic) {
                (Some(content), _) => content.clone(),
                (None, Some(template)) => template::topic_from_template(template, &spec.title),
                (None, None) => template::default_topic(&spec.title),
            };
            if let Err(e) = self.write_half(&pair.topic, &contents, spec.overwrite, reporter) {
                reporter.error(&format!("Topic not written: {e}"));
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(pair),
        }
    }

    fn wrapper_contents(&self, spec: &NewTopic, pair: &TopicPair, templates: &Templates) -> Result<String> {
        let topic_file = pair.topic_file_name();
        let source = spec.source.as_deref();

        let Some(template) = &templates.wrapper else {
            return template::default_wrapper(&spec.title, &topic_file, source);
        };

        let contents = template::wrapper_from_template(template, &spec.title, &topic_file)?;
        match source {
            Some(source) => match template::with_source(&contents, source, &pair.wrapper) {
                Ok(with_source) => Ok(with_source),
                Err(e) => {
                    log::warn!("Template has no usable front matter, source not recorded: {e}");
                    Ok(contents)
                }
            },
            None => Ok(contents),
        }
    }

    fn write_half(&self, path: &Path, contents: &str, overwrite: bool, reporter: &dyn Reporter) -> Result<()> {
        let existed = path.exists();
        write_new(path, contents, overwrite)?;
        if existed {
            reporter.info(&format!("File '{}' overwritten", path.display()));
        } else {
            reporter.success(&format!("File '{}' created", path.display()));
        }
        Ok(())
    }

    /// Rename the pair `old_basename` to the basename of `new_title`.
    ///
    /// Validation checks that both old files exist, that neither new file
    /// exists, and that the old wrapper has front matter. Every problem is
    /// reported before the rename is rejected, and a rejected rename touches
    /// nothing. Without `confirm` only the validation runs.
    pub fn rename(
        &self,
        old_basename: &str,
        new_title: &str,
        confirm: bool,
        reporter: &dyn Reporter,
    ) -> Result<()> {
        let old = self.pair(old_basename);
        let new = self.pair_for_title(new_title)?;
        let same_files = old.basename == new.basename;

        let missing = old.missing();
        for path in &missing {
            reporter.error(&format!("File '{}' not found", path.display()));
        }

        let conflicts: Vec<PathBuf> = if same_files {
            Vec::new()
        } else {
            [&new.wrapper, &new.topic]
                .into_iter()
                .filter(|p| p.exists())
                .cloned()
                .collect()
        };
        for path in &conflicts {
            reporter.error(&format!("File '{}' already exists", path.display()));
        }

        let wrapper = if old.wrapper.is_file() {
            match FrontMatterDoc::load(&old.wrapper) {
                Ok(doc) => Some(doc),
                Err(e) => {
                    reporter.error(&e.to_string());
                    if missing.is_empty() && conflicts.is_empty() {
                        return Err(e);
                    }
                    None
                }
            }
        } else {
            None
        };

        if !missing.is_empty() {
            return Err(Error::MissingPairHalf { missing });
        }
        if let Some(path) = conflicts.into_iter().next() {
            return Err(Error::write_conflict(path));
        }
        let Some(wrapper) = wrapper else {
            return Err(Error::malformed_header(&old.wrapper, "wrapper could not be read"));
        };

        if !confirm {
            reporter.warn(&format!(
                "Topic '{}' NOT renamed to '{}'. Use --confirm",
                old.basename, new.basename
            ));
            return Ok(());
        }

        let old_topic_file = old.topic_file_name();
        let new_topic_file = new.topic_file_name();
        let rewritten = wrapper
            .render()?
            .replace(&old_topic_file, &new_topic_file);
        let mut doc = FrontMatterDoc::parse(rewritten, &new.wrapper)?;
        doc.mapping_mut()
            .insert(Value::from("title"), Value::from(new_title));
        let contents = doc.render()?;

        if same_files {
            write_atomic(&old.wrapper, &contents)?;
        } else {
            // Wrapper first: until the topic moves, the old pair stays whole.
            write_new(&new.wrapper, &contents, false)?;
            if let Err(e) = std::fs::rename(&old.topic, &new.topic) {
                if let Err(cleanup) = std::fs::remove_file(&new.wrapper) {
                    reporter.error(&format!(
                        "File '{}' could not be removed: {cleanup}",
                        new.wrapper.display()
                    ));
                }
                return Err(Error::io_with_path(e, &old.topic));
            }
            std::fs::remove_file(&old.wrapper).map_err(|e| Error::io_with_path(e, &old.wrapper))?;
        }

        reporter.success(&format!(
            "Topic '{}' renamed to '{}' ({})",
            old.basename,
            new.basename,
            new.wrapper.display()
        ));
        Ok(())
    }

    /// Delete the pair whose topic file is `topic_file` (`_<basename>.<ext>`).
    ///
    /// Without `confirm` nothing is removed. With it, each half is removed if
    /// present and each absent half is reported; absence is not an error.
    pub fn delete(&self, topic_file: &str, confirm: bool, reporter: &dyn Reporter) -> Result<()> {
        let Some(wrapper_file) = wrapper_for_topic(topic_file) else {
            return Err(Error::invalid_topic_name(topic_file));
        };

        if !confirm {
            reporter.warn(&format!(
                "Topic '{wrapper_file}' NOT deleted. Use --confirm"
            ));
            return Ok(());
        }

        let mut first_error = None;
        for path in [self.path(topic_file), self.path(wrapper_file)] {
            if !path.exists() {
                reporter.warn(&format!("File '{}' not found", path.display()));
                continue;
            }
            match std::fs::remove_file(&path) {
                Ok(()) => reporter.success(&format!("File '{}' deleted", path.display())),
                Err(e) => {
                    reporter.error(&format!("File '{}' not deleted: {e}", path.display()));
                    first_error.get_or_insert(Error::io_with_path(e, &path));
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
