//! The tasl topic engine.
//!
//! A topic is a pair of files in one directory: a wrapper carrying front
//! matter and an include directive, and an underscore-prefixed topic file
//! carrying the slides. This crate manages those pairs.
//!
//! # Modules
//!
//! - [`pair`]: Creating, renaming, and deleting pairs
//! - [`template`]: Initial wrapper and topic contents
//! - [`copy`]: Copying a pair and its assets elsewhere
//! - [`tags`]: Where tags live in front matter
//! - [`index`]: Loading and filtering a directory of pairs
//! - [`bulk`]: Tag edits and deletion over many pairs
//! - [`scan`]: Splitting a guide document into pairs
//!
//! # Example
//!
//! ```rust,no_run
//! use tasl_core::LogReporter;
//! use tasl_topics::{NewTopic, TopicStore};
//!
//! let store = TopicStore::new("slides");
//! let pair = store.create(&NewTopic::new("Linear Models"), &LogReporter).unwrap();
//! assert!(pair.exists());
//! ```

pub mod bulk;
pub mod copy;
pub mod index;
pub mod pair;
pub mod scan;
pub mod tags;
pub mod template;

// Re-export key types
pub use bulk::{BatchOutcome, BulkMutator};
pub use copy::copy_topic;
pub use index::{FilterResult, TagIndex, TopicEntry, TopicFilter, categorize};
pub use pair::{DEFAULT_EXTENSION, NewTopic, TOPIC_PREFIX, TopicPair, TopicStore};
pub use scan::{ExtractOptions, ExtractReport, extract_guide};
pub use tags::{TagLayout, parse_tag_list};
