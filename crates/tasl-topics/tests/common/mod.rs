//! Common test utilities for tasl-topics integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use tasl_core::RecordingReporter;
use tasl_topics::{ExtractOptions, TagIndex, TagLayout, TopicStore, extract_guide};
use tempfile::TempDir;

/// A guide with three sections, one fenced example and one asset.
pub const GUIDE: &str = "\
Course notes
# Regression Basics
Least squares and friends.
![](assets/fit.png)
# Classification
Logistic regression, trees.
```
# this is a comment in code
```
# Clustering
k-means, hierarchical.
";

/// A temporary workspace holding a guide and a topic directory.
pub struct TestHarness {
    pub dir: TempDir,
    pub guide: PathBuf,
    pub store: TopicStore,
    pub reporter: RecordingReporter,
}

impl TestHarness {
    /// Workspace with the guide written but nothing extracted.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let guide_dir = dir.path().join("lectures");
        let topics = dir.path().join("topics");
        fs::create_dir_all(guide_dir.join("assets")).unwrap();
        fs::create_dir_all(&topics).unwrap();
        fs::write(guide_dir.join("assets/fit.png"), "png").unwrap();
        let guide = guide_dir.join("week1.qmd");
        fs::write(&guide, GUIDE).unwrap();

        Self {
            dir,
            guide,
            store: TopicStore::new(topics),
            reporter: RecordingReporter::new(),
        }
    }

    /// Workspace with the guide already extracted into the topic directory.
    pub fn extracted() -> Self {
        let harness = Self::new();
        let options = ExtractOptions {
            confirm: true,
            ..ExtractOptions::default()
        };
        extract_guide(&harness.guide, &harness.store, options, &harness.reporter)
            .expect("extraction should succeed");
        harness
    }

    /// Load the topic directory.
    pub fn index(&self) -> TagIndex {
        TagIndex::load(self.store.dir(), "qmd", &TagLayout::default(), &self.reporter)
            .expect("index should load")
    }

    /// Sorted file names in the topic directory (top level only).
    pub fn topic_files(&self) -> Vec<String> {
        list(self.store.dir())
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

fn list(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap())
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
