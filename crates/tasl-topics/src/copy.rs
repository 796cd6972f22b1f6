//! Copying a topic pair and its assets to another directory.

use std::path::{Path, PathBuf};

use tasl_content::{CopySummary, copy_assets, extract_assets};
use tasl_core::util::files::copy_with_metadata;
use tasl_core::util::paths::{absolutize, relocate};
use tasl_core::{Error, Reporter, Result};

use crate::pair::TOPIC_PREFIX;

/// Copy the pair whose wrapper is `wrapper`, plus every asset the topic
/// references, into `destination`.
///
/// Each file keeps its layout relative to `root` (usually the working
/// directory); files outside `root` land directly in `destination`. Assets
/// are resolved against the topic's directory. When `perform` is false the
/// copy is only reported.
pub fn copy_topic(
    root: &Path,
    wrapper: &Path,
    destination: &Path,
    overwrite: bool,
    perform: bool,
    reporter: &dyn Reporter,
) -> Result<CopySummary> {
    let wrapper = absolutize(wrapper).map_err(|e| Error::io_with_path(e, wrapper))?;
    let root = absolutize(root).map_err(|e| Error::io_with_path(e, root))?;
    let topic = topic_for_wrapper(&wrapper)?;

    let missing: Vec<PathBuf> = [&wrapper, &topic]
        .into_iter()
        .filter(|p| !p.is_file())
        .cloned()
        .collect();
    if !missing.is_empty() {
        for path in &missing {
            reporter.error(&format!("File '{}' not found", path.display()));
        }
        return Err(Error::MissingPairHalf { missing });
    }

    let topic_text = std::fs::read_to_string(&topic).map_err(|e| Error::io_with_path(e, &topic))?;

    let mut summary = CopySummary::default();
    for source in [&wrapper, &topic] {
        let target = relocate(source, &root, destination);
        copy_file(source, &target, overwrite, perform, reporter, &mut summary);
    }

    // Assets follow the topic so its relative links keep working.
    let topic_dir = topic.parent().unwrap_or(&root);
    let topic_target = relocate(&topic, &root, destination);
    let asset_destination = topic_target.parent().unwrap_or(destination).to_path_buf();
    let assets = copy_assets(
        topic_dir,
        &asset_destination,
        &extract_assets(&topic_text),
        overwrite,
        perform,
        reporter,
    );
    merge(&mut summary, assets);

    if !perform {
        reporter.warn(&format!(
            "Topic '{}' NOT copied to {}. Use --confirm",
            wrapper.display(),
            destination.display()
        ));
    }
    Ok(summary)
}

fn topic_for_wrapper(wrapper: &Path) -> Result<PathBuf> {
    let name = wrapper
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| Error::invalid_topic_name(wrapper.display().to_string()))?;
    if name.starts_with(TOPIC_PREFIX) {
        return Err(Error::invalid_topic_name(name));
    }
    Ok(wrapper.with_file_name(format!("{TOPIC_PREFIX}{name}")))
}

fn copy_file(
    source: &Path,
    target: &Path,
    overwrite: bool,
    perform: bool,
    reporter: &dyn Reporter,
    summary: &mut CopySummary,
) {
    if !perform {
        reporter.info(&format!("Would copy {} to {}", source.display(), target.display()));
        summary.planned.push(source.to_path_buf());
        return;
    }
    match copy_with_metadata(source, target, overwrite) {
        Ok(()) => {
            reporter.success(&format!("Copied {} to {}", source.display(), target.display()));
            summary.copied.push(target.to_path_buf());
        }
        Err(Error::WriteConflict { path }) => {
            reporter.warn(&format!(
                "File {} already exists, not copied. Use --overwrite",
                path.display()
            ));
            summary.skipped.push(path);
        }
        Err(e) => {
            reporter.error(&format!("Failed to copy {}: {e}", source.display()));
            summary.failed.push(target.to_path_buf());
        }
    }
}

fn merge(into: &mut CopySummary, other: CopySummary) {
    into.copied.extend(other.copied);
    into.planned.extend(other.planned);
    into.skipped.extend(other.skipped);
    into.missing.extend(other.missing);
    into.failed.extend(other.failed);
}
