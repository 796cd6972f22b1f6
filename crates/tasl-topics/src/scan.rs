//! Extracting the sections of a guide document into topic pairs.
//!
//! Each level-1 section of the guide becomes one pair in the destination
//! store: the topic file holds `# <title>` followed by the section's lines,
//! and the wrapper records where the section came from in its `source`
//! field. Assets referenced by a section are copied next to the new pair.

use std::path::Path;

use tasl_content::{BlockScanner, copy_assets, extract_assets};
use tasl_core::util::paths::vcs_relative_path;
use tasl_core::{Error, Reporter, Result, clean_topic_name};

use crate::pair::{NewTopic, TopicPair, TopicStore};

/// Settings for [`extract_guide`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Write files; otherwise only report what was found.
    pub confirm: bool,
    /// Replace existing pairs and assets.
    pub overwrite: bool,
    /// Keep lines inside fenced regions as section content.
    pub keep_literal_lines: bool,
}

/// What [`extract_guide`] found and did.
#[derive(Debug, Default)]
pub struct ExtractReport {
    /// Pairs created, or that would be created on a dry run.
    pub topics: Vec<TopicPair>,
    /// Section titles that produce no usable file name.
    pub skipped: Vec<String>,
    /// Sections whose pair could not be written.
    pub failed: Vec<(String, Error)>,
    /// Include targets the guide refers to.
    pub references: Vec<String>,
}

/// Split the guide at `guide` into topic pairs in `store`.
///
/// An unreadable guide fails the whole extraction. Problems with individual
/// sections are reported and recorded; the remaining sections are still
/// processed.
pub fn extract_guide(
    guide: &Path,
    store: &TopicStore,
    options: ExtractOptions,
    reporter: &dyn Reporter,
) -> Result<ExtractReport> {
    let scanned = BlockScanner::new()
        .keep_literal_lines(options.keep_literal_lines)
        .scan_file(guide)?;
    log::debug!(
        "Scanned {}: {} sections, {} prefix lines",
        guide.display(),
        scanned.blocks.len(),
        scanned.prefix.len()
    );

    let source = vcs_relative_path(guide);
    if source.is_none() {
        log::debug!("{} is not under version control; no source recorded", guide.display());
    }
    let guide_dir = guide.parent().unwrap_or_else(|| Path::new("."));

    let mut report = ExtractReport {
        references: scanned.references.clone(),
        ..ExtractReport::default()
    };

    for block in &scanned.blocks {
        let title = block.name.as_str();
        let basename = clean_topic_name(title);
        if basename.is_empty() {
            reporter.warn(&format!("Section '{title}' has no usable name; skipped"));
            report.skipped.push(title.to_string());
            continue;
        }

        let content = topic_body(title, &block.lines);

        if !options.confirm {
            reporter.info(&format!("Found topic '{title}' ({basename})"));
            report.topics.push(store.pair(&basename));
            continue;
        }

        let mut spec = NewTopic::new(title)
            .with_content(content.as_str())
            .overwrite(options.overwrite);
        if let Some(source) = &source {
            spec = spec.with_source(source.as_str());
        }

        match store.create(&spec, reporter) {
            Ok(pair) => {
                copy_assets(
                    guide_dir,
                    store.dir(),
                    &extract_assets(&content),
                    options.overwrite,
                    true,
                    reporter,
                );
                report.topics.push(pair);
            }
            Err(e) => {
                reporter.error(&format!("Topic '{title}' not extracted: {e}"));
                report.failed.push((title.to_string(), e));
            }
        }
    }

    for reference in &report.references {
        reporter.info(&format!("Guide includes '{reference}'"));
    }
    if !options.confirm {
        reporter.warn(&format!(
            "{} topics NOT saved. Use --confirm",
            report.topics.len()
        ));
    }

    Ok(report)
}

fn topic_body(title: &str, lines: &[String]) -> String {
    let mut body = format!("# {title}\n");
    for line in lines {
        body.push_str(line);
        body.push('\n');
    }
    body
}
