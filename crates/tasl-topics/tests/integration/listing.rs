//! Integration tests for listing, filtering, and bulk tag edits.

use tasl_topics::{BulkMutator, TagLayout, TopicFilter};

use crate::common::TestHarness;

#[test]
fn test_keyword_filter_over_extracted_topics() {
    let harness = TestHarness::extracted();
    let index = harness.index();
    assert_eq!(index.len(), 3);

    let filter = TopicFilter::from_tokens(&["+regression", "-trees"], &harness.reporter);
    let result = index.filter(&filter);

    assert_eq!(result.filenames, vec!["_regression-basics.qmd"]);
    assert!(result.available_tags.is_empty());
}

#[test]
fn test_tag_then_filter_by_tag() {
    let harness = TestHarness::extracted();
    let selected = harness.index().filter(&TopicFilter::from_tokens(&["regression"], &harness.reporter));
    assert_eq!(selected.filenames.len(), 2);

    let outcome = BulkMutator::new(&harness.store, TagLayout::default())
        .confirm(true)
        .add_tag(&selected.filenames, "Supervised", &harness.reporter);
    assert!(outcome.is_success());

    let index = harness.index();
    let tagged = index.filter(&TopicFilter::default().with_tags(vec!["supervised".to_string()]));
    assert_eq!(tagged.filenames, vec!["_classification.qmd", "_regression-basics.qmd"]);
    assert_eq!(tagged.available_tags, vec!["supervised"]);

    let untagged = index.filter(&TopicFilter::default().without_tags(vec!["supervised".to_string()]));
    assert_eq!(untagged.filenames, vec!["_clustering.qmd"]);
}

#[test]
fn test_bulk_delete_of_filtered_topics() {
    let harness = TestHarness::extracted();
    let selected = harness.index().filter(&TopicFilter::from_tokens(&["+k-means"], &harness.reporter));
    assert_eq!(selected.filenames, vec!["_clustering.qmd"]);

    let mutator = BulkMutator::new(&harness.store, TagLayout::default());
    mutator.delete(&selected.filenames, &harness.reporter);
    assert_eq!(harness.index().len(), 3);

    mutator.confirm(true).delete(&selected.filenames, &harness.reporter);
    assert_eq!(harness.index().len(), 2);
}
