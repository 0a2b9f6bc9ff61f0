//! Link filter patterns.
//!
//! A pattern selects which extracted links become feed items. Two
//! interpretations are tried and OR-ed together: a literal substring of the
//! URL's full string form, and a shell-style glob (`*`, `?`, `[...]`)
//! matched against the URL's entire path component. `.mp3` therefore works
//! as a quick substring filter, while `/audio/*.m4a` pins down an exact
//! directory.

use glob::{MatchOptions, Pattern};
use url::Url;

/// Glob matching options: `*` and `?` stay within one path segment, the way
/// shells treat `/`.
const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Decides whether `url` satisfies `pattern`.
///
/// - An empty pattern matches every URL (no filter).
/// - A pattern occurring as a literal substring of the URL's full string
///   form matches.
/// - Otherwise the pattern is read as a shell glob and must match the URL's
///   path component in full: `*.mp3` does not match `/music/a.mp3`, but
///   `/music/*.mp3` does.
/// - Anything else — including a malformed glob — does not match.
///
/// The two interpretations form a plain boolean OR; which one accepts a
/// given URL is not observable.
pub fn matches(pattern: &str, url: &Url) -> bool {
    if pattern.is_empty() {
        return true;
    }

    // Substring first: cheap, and most filters are plain fragments like ".mp3".
    if url.as_str().contains(pattern) {
        return true;
    }

    match Pattern::new(pattern) {
        Ok(glob) => glob.matches_with(url.path(), GLOB_OPTIONS),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn url(s: &str) -> Url {
        Url::parse(s).expect("test URL should parse")
    }

    #[test]
    fn test_empty_pattern_matches() {
        assert!(matches("", &url("http://host/books/a.mp3")));
    }

    #[test]
    fn test_substring_of_full_url_matches() {
        let u = url("http://host/books/a.mp3?session=1");
        assert!(matches(".mp3", &u));
        assert!(matches("host/books", &u));
        assert!(matches("session=1", &u));
    }

    #[test]
    fn test_glob_matches_whole_path() {
        let u = url("http://host/books/mybook.mp3");
        assert!(matches("/books/*.mp3", &u));
        assert!(matches("/books/mybook.???", &u));
        assert!(matches("/books/[a-n]*", &u));
    }

    #[test]
    fn test_glob_is_not_a_substring_match() {
        // `*` does not cross path separators, so a bare `*.mp3` cannot
        // cover the leading directory.
        let u = url("http://host/books/mybook.mp3");
        assert!(!matches("*.mp3", &u));
        assert!(!matches("*.ogg", &u));
    }

    #[test]
    fn test_glob_does_not_see_the_query() {
        let u = url("http://host/list?format=mp3");
        assert!(!matches("/list/*.mp3", &u));
        // ...but the substring branch does.
        assert!(matches("format=mp3", &u));
    }

    #[test]
    fn test_no_interpretation_matches() {
        let u = url("http://host/books/mybook.mp3");
        assert!(!matches("video", &u));
        assert!(!matches("/music/*.mp3", &u));
    }

    #[test]
    fn test_malformed_glob_is_just_no_match() {
        let u = url("http://host/books/mybook.mp3");
        // Unclosed character class: invalid as a glob, absent as a substring.
        assert!(!matches("[abc", &u));
        // ...unless the literal text does occur in the URL.
        assert!(matches("[abc", &url("http://host/x%5Babc?q=[abc")));
    }

    proptest! {
        #[test]
        fn prop_empty_pattern_matches_any_url(path in "[a-z0-9._/-]{0,40}") {
            if let Ok(u) = Url::parse(&format!("http://example.com/{path}")) {
                prop_assert!(matches("", &u));
            }
        }

        #[test]
        fn prop_any_url_fragment_matches(start in 0usize..48, len in 1usize..12) {
            let u = url("http://example.com/media/episode-01.mp3?session=abc123");
            let full = u.as_str();
            let start = start.min(full.len() - 1);
            let end = (start + len).min(full.len());
            prop_assert!(matches(&full[start..end], &u));
        }
    }
}
