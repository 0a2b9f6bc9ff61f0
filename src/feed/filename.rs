//! Item title and MIME type derivation.

use crate::mime::MimeTable;

/// Derives a feed-item title and MIME type from a URL path and the link's
/// anchor text.
///
/// The title starts as the path's final segment; non-empty anchor text
/// replaces it entirely. The extension — and therefore the MIME lookup —
/// always comes from the path, never from anchor text. When the path has an
/// extension it is also trimmed as a literal suffix from whatever the title
/// ended up being: `mybook.mp3` becomes `mybook`, and anchor text that
/// happens to end in `.mp3` is trimmed the same way, while any other anchor
/// text is kept as-is.
///
/// The MIME type is `""` when the path has no extension or the table does
/// not know it.
pub fn derive(url_path: &str, anchor_text: &str, table: &MimeTable) -> (String, String) {
    let base = basename(url_path);
    let extension = extension(base);

    let mut title = if anchor_text.is_empty() {
        base.to_owned()
    } else {
        anchor_text.to_owned()
    };

    let mut mime_type = String::new();
    if !extension.is_empty() {
        if let Some(found) = table.lookup(extension) {
            mime_type = found.to_owned();
        }
        if title.ends_with(extension) {
            title.truncate(title.len() - extension.len());
        }
    }

    (title, mime_type)
}

/// Final segment of a URL path, with trailing slashes trimmed
/// (`/books/` → `books`, `/` → `/`).
fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return if path.is_empty() { "" } else { "/" };
    }
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Suffix of `name` from its final dot (inclusive), or `""` without one.
fn extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[idx..],
        None => "",
    }
}
