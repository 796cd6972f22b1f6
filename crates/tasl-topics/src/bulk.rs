//! Tag edits and deletion over a batch of topics.
//!
//! Every operation is a dry run unless `confirm` is set. A failure on one
//! topic is reported and recorded in the [`BatchOutcome`]; the remaining
//! topics are still processed.

use std::path::PathBuf;

use tasl_content::markdown::frontmatter;
use tasl_core::{Error, Reporter, Result};

use crate::pair::{TopicStore, wrapper_for_topic};
use crate::tags::{TagLayout, normalize_tag};

/// Per-topic results of a batch.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Topics that were changed.
    pub changed: Vec<String>,
    /// Topics left as they were (dry run, or nothing to do).
    pub unchanged: Vec<String>,
    /// Topics whose update failed, with the reason.
    pub failed: Vec<(String, Error)>,
}

impl BatchOutcome {
    /// Whether every topic was processed without error.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Applies one mutation to many topics of a [`TopicStore`].
#[derive(Debug, Clone)]
pub struct BulkMutator<'a> {
    store: &'a TopicStore,
    layout: TagLayout,
    confirm: bool,
}

impl<'a> BulkMutator<'a> {
    /// Mutator over `store`; dry run until [`confirm`](Self::confirm).
    pub fn new(store: &'a TopicStore, layout: TagLayout) -> Self {
        Self {
            store,
            layout,
            confirm: false,
        }
    }

    /// Actually perform the mutations.
    pub fn confirm(mut self, confirm: bool) -> Self {
        self.confirm = confirm;
        self
    }

    /// Add `tag` to every topic in `filenames`.
    pub fn add_tag<S: AsRef<str>>(&self, filenames: &[S], tag: &str, reporter: &dyn Reporter) -> BatchOutcome {
        let tag = normalize_tag(tag);
        if !self.confirm {
            reporter.warn(&format!(
                "Tag '{tag}' NOT added to {} topics. Use --confirm",
                filenames.len()
            ));
            return dry_run(filenames);
        }
        self.edit_each(filenames, reporter, |layout, mapping| layout.add(mapping, &tag), |file| {
            format!("Tag '{tag}' added to {file}")
        })
    }

    /// Remove `tag` from every topic in `filenames`.
    pub fn remove_tag<S: AsRef<str>>(&self, filenames: &[S], tag: &str, reporter: &dyn Reporter) -> BatchOutcome {
        let tag = normalize_tag(tag);
        if !self.confirm {
            reporter.warn(&format!(
                "Tag '{tag}' NOT removed from {} topics. Use --confirm",
                filenames.len()
            ));
            return dry_run(filenames);
        }
        self.edit_each(filenames, reporter, |layout, mapping| layout.remove(mapping, &tag), |file| {
            format!("Tag '{tag}' removed from {file}")
        })
    }

    /// Delete every topic pair in `filenames`.
    pub fn delete<S: AsRef<str>>(&self, filenames: &[S], reporter: &dyn Reporter) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for file in filenames.iter().map(AsRef::as_ref) {
            match self.store.delete(file, self.confirm, reporter) {
                Ok(()) if self.confirm => outcome.changed.push(file.to_string()),
                Ok(()) => outcome.unchanged.push(file.to_string()),
                Err(e) => {
                    reporter.error(&format!("Failed to delete {file}: {e}"));
                    outcome.failed.push((file.to_string(), e));
                }
            }
        }
        outcome
    }

    fn edit_each<S, F, M>(&self, filenames: &[S], reporter: &dyn Reporter, edit: F, message: M) -> BatchOutcome
    where
        S: AsRef<str>,
        F: Fn(&TagLayout, &mut tasl_content::Mapping) -> bool,
        M: Fn(&str) -> String,
    {
        let mut outcome = BatchOutcome::default();
        for file in filenames.iter().map(AsRef::as_ref) {
            let result = self.wrapper_path(file).and_then(|wrapper| {
                let mut changed = false;
                frontmatter::update(&wrapper, |mapping| changed = edit(&self.layout, mapping))?;
                Ok(changed)
            });
            match result {
                Ok(true) => {
                    reporter.success(&message(file));
                    outcome.changed.push(file.to_string());
                }
                Ok(false) => {
                    log::debug!("{file} unchanged");
                    outcome.unchanged.push(file.to_string());
                }
                Err(e) => {
                    reporter.error(&format!("Failed to update {file}: {e}"));
                    outcome.failed.push((file.to_string(), e));
                }
            }
        }
        outcome
    }

    fn wrapper_path(&self, topic_file: &str) -> Result<PathBuf> {
        let wrapper = wrapper_for_topic(topic_file).ok_or_else(|| Error::invalid_topic_name(topic_file))?;
        Ok(self.store.path(wrapper))
    }
}

fn dry_run<S: AsRef<str>>(filenames: &[S]) -> BatchOutcome {
    BatchOutcome {
        unchanged: filenames.iter().map(|f| f.as_ref().to_string()).collect(),
        ..BatchOutcome::default()
    }
}
