//! Initial contents of wrapper and topic files.
//!
//! Without a template, wrappers get a minimal front-matter block plus an
//! include directive, and topics get a title slide with a two-column
//! placeholder. A template is an existing pair (`<base>.<ext>` and
//! `_<base>.<ext>`) whose text is reused with the title and include target
//! substituted.

use std::path::Path;

use tasl_content::markdown::directive::{include_target, is_title_field};
use tasl_content::{FrontMatterDoc, Mapping, Value, render_header, render_include};
use tasl_core::{Error, Result};

use crate::pair::TopicPair;

const PLACEHOLDER_BODY: &str = r#"
## Slide 1
:::: {.columns}

::: {.column width="50%"}
### column 1

* bullet 1
* bullet 2
* bullet 3
:::
::: {.column width="50%"}
### column 2

1. item
1. item
1. item
:::
::::
"#;

/// Template texts loaded from an existing pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Templates {
    /// Text of the wrapper template, if present.
    pub wrapper: Option<String>,
    /// Text of the topic template, if present.
    pub topic: Option<String>,
}

impl Templates {
    /// Load whichever halves of `pair` exist.
    ///
    /// Unreadable templates are logged and treated as absent.
    pub fn load(pair: &TopicPair) -> Self {
        Self {
            wrapper: read_optional(&pair.wrapper),
            topic: read_optional(&pair.topic),
        }
    }
}

fn read_optional(path: &Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }
    match std::fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) => {
            log::warn!("Ignoring unreadable template {}: {e}", path.display());
            None
        }
    }
}

/// Default wrapper: front matter with `title` (and `source`, if known)
/// followed by an include of the topic file.
pub fn default_wrapper(title: &str, topic_filename: &str, source: Option<&str>) -> Result<String> {
    let mut mapping = Mapping::new();
    mapping.insert(Value::from("title"), Value::from(title));
    if let Some(source) = source {
        mapping.insert(Value::from("source"), Value::from(source));
    }
    Ok(format!(
        "{}\n{}\n",
        render_header(&mapping)?,
        render_include(topic_filename)
    ))
}

/// Default topic: title heading and a two-column placeholder slide.
pub fn default_topic(title: &str) -> String {
    format!("# {title}\n{PLACEHOLDER_BODY}")
}

/// Wrapper built from a template.
///
/// The first `title:` line is replaced by the new title and every include
/// directive is pointed at `topic_filename`; all other lines are kept
/// verbatim.
pub fn wrapper_from_template(template: &str, title: &str, topic_filename: &str) -> Result<String> {
    let title_line = format!("title: {}", yaml_scalar(title)?);
    let mut title_done = false;
    let mut out = String::with_capacity(template.len());

    for line in template.split_inclusive('\n') {
        let (text, ending) = split_ending(line);
        if !title_done && is_title_field(text) {
            out.push_str(&title_line);
            out.push_str(ending);
            title_done = true;
        } else if include_target(text).is_some() {
            out.push_str(&render_include(topic_filename));
            out.push_str(ending);
        } else {
            out.push_str(line);
        }
    }

    Ok(out)
}

/// Topic built from a template: a new title heading followed by every line
/// of the template after its first.
pub fn topic_from_template(template: &str, title: &str) -> String {
    let rest: String = template.split_inclusive('\n').skip(1).collect();
    format!("# {title}\n{rest}")
}

/// Record `source` in a wrapper's front matter.
pub fn with_source(wrapper: &str, source: &str, origin: &Path) -> Result<String> {
    let mut doc = FrontMatterDoc::parse(wrapper, origin)?;
    doc.mapping_mut()
        .insert(Value::from("source"), Value::from(source));
    doc.render()
}

fn split_ending(line: &str) -> (&str, &str) {
    let text = line.trim_end_matches(['\n', '\r']);
    (text, &line[text.len()..])
}

fn yaml_scalar(value: &str) -> Result<String> {
    let rendered = serde_yaml::to_string(value)
        .map_err(|e| Error::parse(format!("Failed to serialize title: {e}")))?;
    Ok(rendered.trim_end().to_string())
}
