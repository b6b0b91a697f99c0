//! Placeholder scanning.

use regex::Regex;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_.|/@-]+)\s*\}\}").expect("placeholder pattern is valid")
});

/// One placeholder occurrence in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'t> {
    /// The full matched text, braces included, e.g. `{{ a|b }}`.
    pub text: &'t str,
    /// Candidate paths in fallback order.
    pub candidates: Vec<&'t str>,
}

/// Returns every non-overlapping placeholder in `template`, left to right.
///
/// # Example
///
/// ```
/// use treequill::template::placeholders;
///
/// let found = placeholders("Hi {{ user.name|guest }}, {{count}} new");
/// assert_eq!(found.len(), 2);
/// assert_eq!(found[0].text, "{{ user.name|guest }}");
/// assert_eq!(found[0].candidates, vec!["user.name", "guest"]);
/// ```
pub fn placeholders(template: &str) -> Vec<Placeholder<'_>> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|captures| {
            let text = captures.get(0)?.as_str();
            let chain = captures.get(1)?.as_str();
            Some(Placeholder {
                text,
                candidates: chain.split('|').collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_placeholders() {
        assert!(placeholders("plain text").is_empty());
        assert!(placeholders("{single} {{ }}").is_empty());
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let found = placeholders("{{   a.b  }}");
        assert_eq!(found[0].candidates, vec!["a.b"]);
        assert_eq!(found[0].text, "{{   a.b  }}");
    }

    #[test]
    fn test_allowed_characters() {
        let found = placeholders("{{site/base@en-GB_1.x}}");
        assert_eq!(found[0].candidates, vec!["site/base@en-GB_1.x"]);
    }

    #[test]
    fn test_disallowed_characters_do_not_match() {
        assert!(placeholders("{{a b}}").is_empty());
        assert!(placeholders("{{a:b}}").is_empty());
    }

    #[test]
    fn test_repeated_placeholders_are_all_reported() {
        let found = placeholders("{{a}}-{{a}}");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0], found[1]);
    }

    #[test]
    fn test_empty_candidates_are_kept() {
        let found = placeholders("{{a||b}}");
        assert_eq!(found[0].candidates, vec!["a", "", "b"]);
    }
}
