//! Where tags live in a wrapper's front matter.
//!
//! Tags are stored as a top-level `tags` sequence. Older wrappers keep them
//! under a namespace mapping instead:
//!
//! ```yaml
//! tasl:
//!   tags: [regression, intro]
//! ```
//!
//! Reads see the union of both places. Every write moves the tags to the
//! top level and drops the nested key, removing the namespace mapping once
//! it is empty.

use tasl_content::{Mapping, Value};

/// Top-level key holding tags.
pub const TAGS_KEY: &str = "tags";

/// Namespace mapping used by older wrappers.
pub const DEFAULT_NAMESPACE: &str = "tasl";

/// Lowercase and trim a tag.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Split a comma-separated tag list, dropping empty entries.
///
/// ```
/// use tasl_topics::tags::parse_tag_list;
///
/// assert_eq!(parse_tag_list("Intro, regression,,"), vec!["intro", "regression"]);
/// ```
pub fn parse_tag_list(list: &str) -> Vec<String> {
    let mut tags = Vec::new();
    for tag in list.split(',').map(normalize_tag) {
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

/// Reads and writes tags in front matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagLayout {
    namespace: String,
}

impl Default for TagLayout {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

impl TagLayout {
    /// Layout whose legacy tags live under `namespace`.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// The legacy namespace key.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// All tags in `mapping`, top-level first, lowercased and de-duplicated.
    ///
    /// Non-string entries are ignored; a single string is treated as a
    /// one-element list.
    pub fn read(&self, mapping: &Mapping) -> Vec<String> {
        let mut tags = Vec::new();
        let nested = mapping
            .get(self.namespace.as_str())
            .and_then(Value::as_mapping)
            .and_then(|ns| ns.get(TAGS_KEY));

        for value in [mapping.get(TAGS_KEY), nested].into_iter().flatten() {
            for tag in tag_strings(value) {
                let tag = normalize_tag(tag);
                if !tag.is_empty() && !tags.contains(&tag) {
                    tags.push(tag);
                }
            }
        }
        tags
    }

    /// Replace the tags in `mapping` with `tags`, in canonical form.
    ///
    /// An empty list removes the top-level key rather than writing `[]`.
    pub fn write(&self, mapping: &mut Mapping, tags: &[String]) {
        self.strip_legacy(mapping);
        if tags.is_empty() {
            let taken = std::mem::take(mapping);
            *mapping = taken
                .into_iter()
                .filter(|(key, _)| key.as_str() != Some(TAGS_KEY))
                .collect();
        } else {
            let sequence = tags.iter().map(|t| Value::from(t.as_str())).collect();
            mapping.insert(Value::from(TAGS_KEY), Value::Sequence(sequence));
        }
    }

    /// Add `tag` if absent. Returns whether the tag list changed.
    ///
    /// A legacy layout is migrated even when the tag was already present.
    pub fn add(&self, mapping: &mut Mapping, tag: &str) -> bool {
        let tag = normalize_tag(tag);
        let mut tags = self.read(mapping);
        let changed = !tags.contains(&tag);
        if changed {
            tags.push(tag);
        }
        if changed || self.has_legacy(mapping) {
            self.write(mapping, &tags);
        }
        changed
    }

    /// Remove every case-insensitive match of `tag`. Returns whether the tag
    /// list changed.
    pub fn remove(&self, mapping: &mut Mapping, tag: &str) -> bool {
        let tag = normalize_tag(tag);
        let mut tags = self.read(mapping);
        let before = tags.len();
        tags.retain(|t| *t != tag);
        let changed = tags.len() != before;
        if changed || self.has_legacy(mapping) {
            self.write(mapping, &tags);
        }
        changed
    }

    /// Whether `mapping` still carries nested tags.
    pub fn has_legacy(&self, mapping: &Mapping) -> bool {
        mapping
            .get(self.namespace.as_str())
            .and_then(Value::as_mapping)
            .is_some_and(|ns| ns.contains_key(TAGS_KEY))
    }

    fn strip_legacy(&self, mapping: &mut Mapping) {
        if !self.has_legacy(mapping) {
            return;
        }
        let taken = std::mem::take(mapping);
        *mapping = taken
            .into_iter()
            .filter_map(|(key, value)| {
                if key.as_str() != Some(self.namespace.as_str()) {
                    return Some((key, value));
                }
                let Value::Mapping(ns) = value else {
                    return Some((key, value));
                };
                let rest: Mapping = ns
                    .into_iter()
                    .filter(|(k, _)| k.as_str() != Some(TAGS_KEY))
                    .collect();
                (!rest.is_empty()).then(|| (key, Value::Mapping(rest)))
            })
            .collect();
    }
}

fn tag_strings(value: &Value) -> Vec<&str> {
    match value {
        Value::String(s) => vec![s.as_str()],
        Value::Sequence(items) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}
