//! Command implementations.
//!
//! Each `cmd_*` function takes its inputs explicitly (directories, config,
//! reporter, output sink) so it can be driven from tests without touching
//! the process's working directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use tasl_core::{Error, Reporter, Result};
use tasl_topics::pair::{TopicPair, wrapper_for_topic};
use tasl_topics::{
    BulkMutator, ExtractOptions, FilterResult, NewTopic, TOPIC_PREFIX, TagIndex, TopicFilter,
    TopicStore, copy_topic, extract_guide, parse_tag_list,
};

use crate::cli::{Command, ListArgs, WriteArgs};
use crate::config::TaslConfig;
use crate::config_handlers::handle_config_command;

/// Run one parsed command.
pub fn run(
    command: Command,
    config_path: Option<&str>,
    config: &TaslConfig,
    reporter: &dyn Reporter,
) -> Result<()> {
    match command {
        Command::Create {
            topic,
            overwrite,
            template,
            destination,
        } => cmd_create(&topic, overwrite, template.as_deref(), &destination, config, reporter).map(|_| ()),
        Command::Scan {
            files,
            write,
            keep_code,
        } => cmd_scan(&files, &write, keep_code, config, reporter),
        Command::Copy { files, write } => {
            let root = std::env::current_dir()?;
            cmd_copy(&root, &files, &write, reporter)
        }
        Command::Rename {
            wrapper,
            new_topic,
            confirm,
        } => cmd_rename(&wrapper, &new_topic, confirm, config, reporter),
        Command::Delete { wrapper, confirm } => cmd_delete(&wrapper, confirm, config, reporter),
        Command::List(args) => {
            let mut out = std::io::stdout().lock();
            cmd_list(Path::new("."), &args, config, reporter, &mut out).map(|_| ())
        }
        Command::Config { action } => handle_config_command(config_path, action),
    }
}

/// `tasl create`: create a topic pair, using the template when it exists.
pub fn cmd_create(
    topic: &str,
    overwrite: bool,
    template: Option<&str>,
    destination: &Path,
    config: &TaslConfig,
    reporter: &dyn Reporter,
) -> Result<TopicPair> {
    let store = store_in(destination, config);
    let spec = NewTopic::new(topic)
        .with_template(template.unwrap_or(&config.template))
        .overwrite(overwrite);
    store.create(&spec, reporter)
}

/// `tasl scan`: extract every guide into topic pairs in the destination.
pub fn cmd_scan(
    files: &[PathBuf],
    write: &WriteArgs,
    keep_code: bool,
    config: &TaslConfig,
    reporter: &dyn Reporter,
) -> Result<()> {
    require_dir(&write.destination)?;
    let store = store_in(&write.destination, config);
    let options = ExtractOptions {
        confirm: write.confirm,
        overwrite: write.overwrite,
        keep_literal_lines: keep_code,
    };

    let mut failed = 0;
    let mut total = 0;
    for file in files {
        match extract_guide(file, &store, options, reporter) {
            Ok(report) => {
                total += report.topics.len() + report.failed.len();
                failed += report.failed.len();
            }
            Err(e) if e.is_item_level() => {
                reporter.error(&e.to_string());
                total += 1;
                failed += 1;
            }
            Err(e) => return Err(e),
        }
    }
    finish(failed, total)
}

/// `tasl copy`: copy each pair (and its assets) into the destination,
/// keeping its layout relative to `root`.
pub fn cmd_copy(root: &Path, files: &[PathBuf], write: &WriteArgs, reporter: &dyn Reporter) -> Result<()> {
    require_dir(&write.destination)?;
    let mut failed = 0;
    for file in files {
        match copy_topic(root, file, &write.destination, write.overwrite, write.confirm, reporter) {
            Ok(summary) => failed += summary.failed.len(),
            Err(e) if e.is_item_level() => {
                reporter.error(&e.to_string());
                failed += 1;
            }
            Err(e) => return Err(e),
        }
    }
    finish(failed, files.len())
}

/// `tasl rename`: rename the pair whose wrapper is `wrapper`.
pub fn cmd_rename(
    wrapper: &Path,
    new_topic: &str,
    confirm: bool,
    config: &TaslConfig,
    reporter: &dyn Reporter,
) -> Result<()> {
    let (store, name) = locate_wrapper(wrapper, config)?;
    let basename = Path::new(&name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or(name);
    store.rename(&basename, new_topic, confirm, reporter)
}

/// `tasl delete`: delete the pair whose wrapper is `wrapper`.
pub fn cmd_delete(wrapper: &Path, confirm: bool, config: &TaslConfig, reporter: &dyn Reporter) -> Result<()> {
    let (store, name) = locate_wrapper(wrapper, config)?;
    store.delete(&format!("{TOPIC_PREFIX}{name}"), confirm, reporter)
}

/// `tasl list`: print the topics in `dir` that pass the filters, then apply
/// any requested tag edit, delete, or copy to them.
pub fn cmd_list(
    dir: &Path,
    args: &ListArgs,
    config: &TaslConfig,
    reporter: &dyn Reporter,
    out: &mut dyn Write,
) -> Result<FilterResult> {
    let layout = config.tag_layout();
    let index = TagIndex::load(dir, &config.extension, &layout, reporter)?;

    let filter = TopicFilter::from_tokens(&args.filters, reporter)
        .with_tags(args.with_tags.as_deref().map(parse_tag_list).unwrap_or_default())
        .without_tags(args.without_tags.as_deref().map(parse_tag_list).unwrap_or_default());
    let result = index.filter(&filter);

    for filename in &result.filenames {
        writeln!(out, "{filename}")?;
    }
    writeln!(out, "Tags: {}", result.available_tags.join(", "))?;

    let store = store_in(dir, config);
    let mutator = BulkMutator::new(&store, layout).confirm(args.confirm);
    let mut failed = 0;

    if let Some(tag) = &args.add_tag {
        failed += mutator.add_tag(&result.filenames, tag, reporter).failed.len();
    }
    if let Some(tag) = &args.remove_tag {
        failed += mutator.remove_tag(&result.filenames, tag, reporter).failed.len();
    }
    if args.copy
        && let Some(destination) = &args.destination
    {
        require_dir(destination)?;
        for filename in &result.filenames {
            let Some(wrapper) = wrapper_for_topic(filename) else {
                continue;
            };
            match copy_topic(dir, &dir.join(wrapper), destination, false, args.confirm, reporter) {
                Ok(summary) => failed += summary.failed.len(),
                Err(e) => {
                    reporter.error(&e.to_string());
                    failed += 1;
                }
            }
        }
    }
    if args.delete {
        failed += mutator.delete(&result.filenames, reporter).failed.len();
    }

    finish(failed, result.filenames.len())?;
    Ok(result)
}

fn store_in(dir: &Path, config: &TaslConfig) -> TopicStore {
    TopicStore::new(dir).with_extension(config.extension.as_str())
}

/// Store for the wrapper's directory and extension, plus the wrapper's file
/// name.
fn locate_wrapper(wrapper: &Path, config: &TaslConfig) -> Result<(TopicStore, String)> {
    let name = wrapper
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| Error::invalid_topic_name(wrapper.display().to_string()))?;
    if name.starts_with(TOPIC_PREFIX) {
        return Err(Error::invalid_topic_name(name));
    }
    let dir = wrapper
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let extension = wrapper
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| config.extension.clone());
    Ok((TopicStore::new(dir).with_extension(extension), name))
}

fn require_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(Error::config(format!(
            "Destination {} is not a directory",
            path.display()
        )))
    }
}

fn finish(failed: usize, total: usize) -> Result<()> {
    if failed == 0 {
        Ok(())
    } else {
        Err(Error::Incomplete { failed, total })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tasl_core::RecordingReporter;
    use tempfile::TempDir;

    const GUIDE: &str = "# Alpha Topic\nalpha text\n# Beta Topic\nalpha beta text\n# Gamma\nnothing\n";

    fn write_args(destination: &Path, confirm: bool) -> WriteArgs {
        WriteArgs {
            confirm,
            destination: destination.to_path_buf(),
            overwrite: false,
        }
    }

    fn scanned() -> (TempDir, TaslConfig) {
        let dir = TempDir::new().unwrap();
        let guide = dir.path().join("guide.qmd");
        fs::write(&guide, GUIDE).unwrap();
        let config = TaslConfig::default();
        cmd_scan(&[guide], &write_args(dir.path(), true), false, &config, &RecordingReporter::new()).unwrap();
        (dir, config)
    }

    fn list(dir: &Path, args: ListArgs, config: &TaslConfig) -> (FilterResult, String) {
        let mut out = Vec::new();
        let result = cmd_list(dir, &args, config, &RecordingReporter::new(), &mut out).unwrap();
        (result, String::from_utf8(out).unwrap())
    }

    // ------------------------------------------------------------------------
    // create
    // ------------------------------------------------------------------------

    #[test]
    fn test_create_uses_configured_extension() {
        let dir = TempDir::new().unwrap();
        let config = TaslConfig {
            extension: "md".to_string(),
            ..TaslConfig::default()
        };

        let pair = cmd_create("Intro", false, None, dir.path(), &config, &RecordingReporter::new()).unwrap();

        assert_eq!(pair.wrapper, dir.path().join("intro.md"));
        assert!(pair.exists());
    }

    #[test]
    fn test_create_invalid_name() {
        let dir = TempDir::new().unwrap();
        let err = cmd_create(
            "<b></b>",
            false,
            None,
            dir.path(),
            &TaslConfig::default(),
            &RecordingReporter::new(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidTopicName { .. }));
    }

    // ------------------------------------------------------------------------
    // scan
    // ------------------------------------------------------------------------

    #[test]
    fn test_scan_unreadable_guide_is_reported() {
        let dir = TempDir::new().unwrap();
        let reporter = RecordingReporter::new();

        let err = cmd_scan(
            &[dir.path().join("missing.qmd")],
            &write_args(dir.path(), true),
            false,
            &TaslConfig::default(),
            &reporter,
        )
        .unwrap_err();

        assert!(matches!(err, Error::Incomplete { failed: 1, .. }));
        assert!(reporter.contains("missing.qmd"));
    }

    #[test]
    fn test_scan_requires_directory() {
        let dir = TempDir::new().unwrap();
        let err = cmd_scan(
            &[],
            &write_args(&dir.path().join("nope"), true),
            false,
            &TaslConfig::default(),
            &RecordingReporter::new(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    // ------------------------------------------------------------------------
    // list
    // ------------------------------------------------------------------------

    #[test]
    fn test_list_prints_matches_and_tags() {
        let (dir, config) = scanned();
        let args = ListArgs {
            filters: vec!["+alpha".to_string(), "-beta".to_string()],
            ..ListArgs::default()
        };

        let (result, text) = list(dir.path(), args, &config);

        assert_eq!(result.filenames, vec!["_alpha-topic.qmd"]);
        assert_eq!(text, "_alpha-topic.qmd\nTags: \n");
    }

    #[test]
    fn test_list_add_tag_then_filter() {
        let (dir, config) = scanned();
        let tag = ListArgs {
            filters: vec!["alpha".to_string()],
            add_tag: Some("Week1".to_string()),
            confirm: true,
            ..ListArgs::default()
        };
        list(dir.path(), tag, &config);

        let by_tag = ListArgs {
            with_tags: Some("week1".to_string()),
            ..ListArgs::default()
        };
        let (result, text) = list(dir.path(), by_tag, &config);

        assert_eq!(result.filenames, vec!["_alpha-topic.qmd", "_beta-topic.qmd"]);
        assert!(text.ends_with("Tags: week1\n"));
    }

    #[test]
    fn test_list_delete_unconfirmed_keeps_files() {
        let (dir, config) = scanned();
        let args = ListArgs {
            filters: vec!["gamma".to_string()],
            delete: true,
            ..ListArgs::default()
        };

        list(dir.path(), args.clone(), &config);
        assert!(dir.path().join("gamma.qmd").exists());

        list(dir.path(), ListArgs { confirm: true, ..args }, &config);
        assert!(!dir.path().join("gamma.qmd").exists());
        assert!(!dir.path().join("_gamma.qmd").exists());
    }

    #[test]
    fn test_list_copy_confirmed() {
        let (dir, config) = scanned();
        let out = dir.path().join("out");
        fs::create_dir(&out).unwrap();
        let args = ListArgs {
            filters: vec!["gamma".to_string()],
            copy: true,
            confirm: true,
            destination: Some(out.clone()),
            ..ListArgs::default()
        };

        list(dir.path(), args, &config);

        assert!(out.join("gamma.qmd").is_file());
        assert!(out.join("_gamma.qmd").is_file());
    }

    // ------------------------------------------------------------------------
    // rename / delete
    // ------------------------------------------------------------------------

    #[test]
    fn test_rename_and_delete_by_wrapper_path() {
        let (dir, config) = scanned();
        let reporter = RecordingReporter::new();

        cmd_rename(&dir.path().join("gamma.qmd"), "Delta", true, &config, &reporter).unwrap();
        assert!(dir.path().join("_delta.qmd").exists());

        cmd_delete(&dir.path().join("delta.qmd"), true, &config, &reporter).unwrap();
        assert!(!dir.path().join("delta.qmd").exists());
        assert!(!dir.path().join("_delta.qmd").exists());
    }

    #[test]
    fn test_locate_wrapper_rejects_topic_file() {
        let err = locate_wrapper(Path::new("_intro.qmd"), &TaslConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidTopicName { .. }));
    }

    #[test]
    fn test_locate_wrapper_bare_name() {
        let (store, name) = locate_wrapper(Path::new("intro.md"), &TaslConfig::default()).unwrap();
        assert_eq!(store.dir(), Path::new("."));
        assert_eq!(store.extension(), "md");
        assert_eq!(name, "intro.md");
    }
}
