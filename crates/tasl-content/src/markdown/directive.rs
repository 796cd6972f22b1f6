//! Line-level grammar of guide and topic documents.
//!
//! tasl never renders documents; it only recognizes a handful of line
//! shapes:
//!
//! | Shape            | Grammar                                            |
//! |------------------|----------------------------------------------------|
//! | fence            | line starting with three backticks                 |
//! | level-1 header   | line starting with `# `; the rest (trimmed) is the name |
//! | include directive| `{{< include PATH >}}` alone on a line; `PATH` may be wrapped in `'` or `"` |
//! | title field      | `title:` at the start of a line inside front matter |
//!
//! # Example
//!
//! ```rust
//! use tasl_content::markdown::directive::{header_name, include_target, is_fence, render_include};
//!
//! assert_eq!(include_target("{{< include '_intro.qmd' >}}"), Some("_intro.qmd"));
//! assert_eq!(include_target("{{< include _intro.qmd >}}"), Some("_intro.qmd"));
//! assert_eq!(header_name("# Linear Models "), Some("Linear Models"));
//! assert!(is_fence("```{python}"));
//! assert_eq!(render_include("_a.qmd"), "{{< include '_a.qmd' >}}");
//! ```

use std::sync::LazyLock;

use regex::Regex;

/// Prefix of a fence line.
pub const FENCE: &str = "```";

/// Prefix of a level-1 header line.
pub const HEADER_PREFIX: &str = "# ";

static INCLUDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*\{\{<\s*include\s+['"]?([^'"\s>]+)['"]?\s*>\}\}\s*$"#)
        .expect("Invalid include directive regex")
});

static TITLE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^title\s*:").expect("Invalid title field regex"));

/// Whether `line` opens or closes a literal region.
pub fn is_fence(line: &str) -> bool {
    line.starts_with(FENCE)
}

/// The name of a level-1 header, or `None` if `line` is not one.
///
/// Deeper headers (`## ...`) and `#word` without a space are not level-1
/// headers.
pub fn header_name(line: &str) -> Option<&str> {
    line.strip_prefix(HEADER_PREFIX).map(str::trim)
}

/// The target of an include directive, or `None` if `line` is not one.
pub fn include_target(line: &str) -> Option<&str> {
    INCLUDE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Render an include directive for `target`.
pub fn render_include(target: &str) -> String {
    format!("{{{{< include '{target}' >}}}}")
}

/// Whether `line` is a front-matter `title:` field.
pub fn is_title_field(line: &str) -> bool {
    TITLE_FIELD.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // include directive
    // ------------------------------------------------------------------------

    #[test]
    fn test_include_single_quoted() {
        assert_eq!(include_target("{{< include '_a.qmd' >}}"), Some("_a.qmd"));
    }

    #[test]
    fn test_include_double_quoted() {
        assert_eq!(include_target("{{< include \"_a.qmd\" >}}"), Some("_a.qmd"));
    }

    #[test]
    fn test_include_unquoted_with_padding() {
        assert_eq!(
            include_target("  {{<include   parts/_b.qmd>}}  "),
            Some("parts/_b.qmd")
        );
    }

    #[test]
    fn test_include_must_be_alone_on_line() {
        assert_eq!(include_target("see {{< include '_a.qmd' >}}"), None);
        assert_eq!(include_target("{{< include '_a.qmd' >}} and more"), None);
    }

    #[test]
    fn test_include_other_shortcodes_ignored() {
        assert_eq!(include_target("{{< video intro.mp4 >}}"), None);
        assert_eq!(include_target("{{< include >}}"), None);
    }

    #[test]
    fn test_render_include_round_trips() {
        let line = render_include("_topic.qmd");
        assert_eq!(include_target(&line), Some("_topic.qmd"));
    }

    // ------------------------------------------------------------------------
    // headers and fences
    // ------------------------------------------------------------------------

    #[test]
    fn test_header_name() {
        assert_eq!(header_name("# Topic One"), Some("Topic One"));
        assert_eq!(header_name("#   Spaced   "), Some("Spaced"));
        assert_eq!(header_name("## Sub"), None);
        assert_eq!(header_name("#NoSpace"), None);
        assert_eq!(header_name(" # Indented"), None);
    }

    #[test]
    fn test_is_fence() {
        assert!(is_fence("```"));
        assert!(is_fence("```{r}"));
        assert!(is_fence("````"));
        assert!(!is_fence(" ```"));
        assert!(!is_fence("``"));
    }

    #[test]
    fn test_is_title_field() {
        assert!(is_title_field("title: Intro"));
        assert!(is_title_field("title : Intro"));
        assert!(!is_title_field("subtitle: Intro"));
        assert!(!is_title_field("  title: nested"));
    }
}
