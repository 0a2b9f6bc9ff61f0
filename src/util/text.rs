use std::borrow::Cow;

/// Strips control characters from a string, keeping tab, newline and
/// carriage return.
///
/// Page titles and anchor text come from arbitrary remote HTML; raw control
/// characters are not representable in XML 1.0 even when escaped, so they
/// are removed before the text is embedded in the feed.
///
/// Returns `Cow::Borrowed` when the input is already clean — the common
/// case, with no allocation.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(is_stripped) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().filter(|c| !is_stripped(*c)).collect())
}

fn is_stripped(c: char) -> bool {
    c.is_control() && !matches!(c, '\t' | '\n' | '\r')
}
