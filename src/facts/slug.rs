//! Normalization of display names into namespace-safe segments.

use deunicode::deunicode_with_tofu;

const DASH: char = '-';

/// Turn a repository or label name into a single lowercase path segment.
///
/// Non-ASCII text is transliterated first (`café` becomes `cafe`, `バグ` becomes `bagu`).
/// `.` becomes `_`, runs of any other character outside `[a-z0-9_-]` collapse to one `-`,
/// and leading or trailing `-` and `_` are dropped. A name with nothing left maps to `_`.
///
/// ```ignore
/// // This is an internal utility function
/// assert_eq!(make("My Repo.rs"), "my-repo_rs");
/// assert_eq!(make("good first issue"), "good-first-issue");
/// ```
#[must_use]
pub fn make(name: &str) -> String {
    let ascii = deunicode_with_tofu(name, "-");
    let mut out = String::with_capacity(ascii.len());
    for c in ascii.chars() {
        let c = match c {
            '.' => '_',
            c if c.is_ascii_alphanumeric() || c == '_' || c == DASH => c.to_ascii_lowercase(),
            _ => DASH,
        };

        if c == DASH && out.ends_with(DASH) {
            continue;
        }
        out.push(c);
    }

    let trimmed = out.trim_matches(['-', '_']);
    if trimmed.is_empty() { "_".to_owned() } else { trimmed.to_owned() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_plain_names() {
        assert_eq!(make("widget"), "widget");
        assert_eq!(make("Widget"), "widget");
        assert_eq!(make("my-repo_2"), "my-repo_2");
    }

    #[test]
    fn test_make_dots_become_underscores() {
        assert_eq!(make("grafana.com"), "grafana_com");
        assert_eq!(make("v1.2.3"), "v1_2_3");
    }

    #[test]
    fn test_make_collapses_separators() {
        assert_eq!(make("good first issue"), "good-first-issue");
        assert_eq!(make("type: bug / crash"), "type-bug-crash");
        assert_eq!(make("  spaced  "), "spaced");
        assert_eq!(make("a--b"), "a-b");
    }

    #[test]
    fn test_make_never_returns_empty() {
        assert_eq!(make(""), "_");
        assert_eq!(make("???"), "_");
        assert_eq!(make("*"), "_");
    }

    #[test]
    fn test_make_transliterates_non_ascii() {
        assert_eq!(make("café"), "cafe");
        assert_eq!(make("Ünïcödé"), "unicode");
        assert_eq!(make("naïve.rs"), "naive_rs");
    }

    #[test]
    fn test_make_keeps_distinct_non_latin_names_apart() {
        let bug = make("バグ");
        let feature = make("機能");

        assert_ne!(bug, "_");
        assert_ne!(feature, "_");
        assert_ne!(bug, feature);
        assert!(bug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'), "{bug}");
    }
}
