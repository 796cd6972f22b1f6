//! Topic name sanitizing.
//!
//! Turns an authored topic title into the basename used for its files.
//! Basenames are lowercase kebab-case made only of ASCII letters, digits,
//! and single dashes.

use std::sync::LazyLock;

use regex::Regex;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid HTML tag regex"));

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s]+").expect("Invalid character class regex"));

/// Clean a topic title for use as a file basename.
///
/// Performs the following transformations:
/// 1. Strips HTML-like tags (`<span>`, `</b>`, ...)
/// 2. Converts to lowercase
/// 3. Replaces every run of characters outside `[a-z0-9]` and whitespace with a space
/// 4. Collapses whitespace into single dashes
/// 5. Trims leading/trailing dashes
///
/// An empty result means the title has no usable characters; callers treat
/// that as an invalid topic name.
///
/// # Examples
///
/// ```
/// use tasl_core::util::ids::clean_topic_name;
///
/// assert_eq!(clean_topic_name("Voice Leading"), "voice-leading");
/// assert_eq!(clean_topic_name("What's <em>new</em> in 3.0?"), "what-s-new-in-3-0");
/// assert_eq!(clean_topic_name("  --Intro--  "), "intro");
/// assert_eq!(clean_topic_name("!!!"), "");
/// ```
pub fn clean_topic_name(name: &str) -> String {
    let stripped = HTML_TAG.replace_all(name, "");
    let lowered = stripped.to_lowercase();
    let spaced = DISALLOWED.replace_all(&lowered, " ");

    spaced
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join("-")
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    static CLEAN_SHAPE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap());

    // -------------------------------------------------------------------------
    // clean_topic_name tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_clean_simple() {
        assert_eq!(clean_topic_name("dissonance"), "dissonance");
    }

    #[test]
    fn test_clean_with_spaces() {
        assert_eq!(clean_topic_name("Voice Leading"), "voice-leading");
    }

    #[test]
    fn test_clean_collapses_whitespace() {
        assert_eq!(clean_topic_name("  Mixed \t  Case  "), "mixed-case");
    }

    #[test]
    fn test_clean_strips_html_tags() {
        assert_eq!(
            clean_topic_name("<span class=\"hl\">Linear</span> Models"),
            "linear-models"
        );
    }

    #[test]
    fn test_clean_punctuation_becomes_separator() {
        assert_eq!(clean_topic_name("Bias/Variance: a trade-off"), "bias-variance-a-trade-off");
    }

    #[test]
    fn test_clean_non_ascii_letters_dropped() {
        assert_eq!(clean_topic_name("Café Réunion"), "caf-r-union");
    }

    #[test]
    fn test_clean_empty_and_symbols() {
        assert_eq!(clean_topic_name(""), "");
        assert_eq!(clean_topic_name("   "), "");
        assert_eq!(clean_topic_name("?!*&"), "");
        assert_eq!(clean_topic_name("<br/>"), "");
    }

    #[test]
    fn test_clean_already_clean() {
        assert_eq!(clean_topic_name("week-3-review"), "week-3-review");
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    proptest! {
        #[test]
        fn test_clean_is_idempotent(s in "\\PC*") {
            let once = clean_topic_name(&s);
            prop_assert_eq!(clean_topic_name(&once), once);
        }

        #[test]
        fn test_clean_output_shape(s in "\\PC*") {
            let cleaned = clean_topic_name(&s);
            prop_assert!(cleaned.is_empty() || CLEAN_SHAPE.is_match(&cleaned));
        }
    }
}
