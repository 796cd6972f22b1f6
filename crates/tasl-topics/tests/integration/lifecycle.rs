//! Integration tests for the pair lifecycle: extract, rename, copy, delete.

use std::fs;

use tasl_content::FrontMatterDoc;
use tasl_topics::{NewTopic, copy_topic};

use crate::common::TestHarness;

#[test]
fn test_extract_creates_pairs_and_assets() {
    let harness = TestHarness::extracted();

    assert_eq!(
        harness.topic_files(),
        vec![
            "_classification.qmd",
            "_clustering.qmd",
            "_regression-basics.qmd",
            "classification.qmd",
            "clustering.qmd",
            "regression-basics.qmd",
        ]
    );
    assert!(harness.store.dir().join("assets/fit.png").is_file());

    let classification = fs::read_to_string(harness.store.path("_classification.qmd")).unwrap();
    assert_eq!(classification, "# Classification\nLogistic regression, trees.\n");
}

#[test]
fn test_rename_then_delete() {
    let harness = TestHarness::extracted();
    let store = &harness.store;

    store
        .rename("clustering", "Unsupervised Clustering", true, &harness.reporter)
        .expect("rename should succeed");

    let wrapper = FrontMatterDoc::load(&store.path("unsupervised-clustering.qmd")).unwrap();
    assert_eq!(wrapper.get_str("title"), Some("Unsupervised Clustering"));
    assert!(wrapper.body().contains("_unsupervised-clustering.qmd"));
    assert!(!store.path("clustering.qmd").exists());

    store
        .delete("_unsupervised-clustering.qmd", true, &harness.reporter)
        .expect("delete should succeed");
    assert_eq!(harness.topic_files().len(), 4);
}

#[test]
fn test_rename_collision_is_refused() {
    let harness = TestHarness::extracted();
    let before = harness.topic_files();

    let result = harness
        .store
        .rename("clustering", "Classification", true, &harness.reporter);

    assert!(result.is_err());
    assert_eq!(harness.topic_files(), before);
}

#[test]
fn test_create_then_copy_elsewhere() {
    let harness = TestHarness::new();
    let store = &harness.store;
    store
        .create(
            &NewTopic::new("Plots").with_content("# Plots\n![](assets/fit.png)\n"),
            &harness.reporter,
        )
        .unwrap();
    fs::create_dir_all(store.dir().join("assets")).unwrap();
    fs::write(store.dir().join("assets/fit.png"), "png").unwrap();
    let out = harness.dir.path().join("shared");

    copy_topic(
        harness.dir.path(),
        &store.path("plots.qmd"),
        &out,
        false,
        true,
        &harness.reporter,
    )
    .unwrap();

    assert!(out.join("topics/plots.qmd").is_file());
    assert!(out.join("topics/_plots.qmd").is_file());
    assert!(out.join("topics/assets/fit.png").is_file());
}
