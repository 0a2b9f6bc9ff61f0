//! RSS 2.0 feed synthesis.

use std::fmt::Write;

use quick_xml::escape::escape;
use url::Url;

use crate::dom::{Document, Node};
use crate::mime::MimeTable;
use crate::util::strip_control_chars;

use super::extract::{extract_links, ResolvedLink};

/// Channel title used when the page has no non-empty `<title>`.
pub const DEFAULT_FEED_TITLE: &str = "Book";

/// Synthesizes the complete RSS 2.0 document for a fetched page.
///
/// The channel title is the text of the page's `<title>` — located as the
/// first `html` element, its first `head` child, the first `title` under
/// that — falling back to [`DEFAULT_FEED_TITLE`] when any of those is
/// missing or the text is empty. Items are the links extracted from the
/// page's `<body>` that match `pattern`, in document order, each emitted as
/// a `<title>` plus an `<enclosure>`.
///
/// A missing document or missing structural elements degrade to the default
/// title and zero items; synthesis itself never fails. Output is a single
/// line with no indentation, so re-synthesizing the same document is
/// byte-identical. Titles and URLs are XML-escaped on the way out.
pub fn synthesize(
    document: Option<&Document>,
    pattern: &str,
    base: &Url,
    table: &MimeTable,
) -> String {
    let html = document.and_then(|doc| doc.first_element("html"));

    let page_title = html
        .and_then(|node| node.first_child_element("head"))
        .and_then(|head| head.first_child_element("title"))
        .map(Node::first_text)
        .unwrap_or("");
    let feed_title = if page_title.is_empty() {
        DEFAULT_FEED_TITLE
    } else {
        page_title
    };

    let body = html.and_then(|node| node.first_child_element("body"));
    let links = extract_links(body, pattern, base, table);

    let mut feed = String::from("<?xml version='1.0' encoding='UTF-8' ?>");
    feed.push_str("<rss version='2.0'><channel>");
    let _ = write!(feed, "<title>{}</title>", escape_text(feed_title));
    for link in &links {
        write_item(&mut feed, link);
    }
    feed.push_str("</channel></rss>");
    feed
}

fn write_item(feed: &mut String, link: &ResolvedLink) {
    let _ = write!(
        feed,
        "<item><title>{}</title><enclosure url=\"{}\" type=\"{}\"/></item>",
        escape_text(&link.title),
        escape(link.url.as_str()),
        escape(&link.mime_type),
    );
}

/// Feed-bound text: control characters are stripped (they are invalid in
/// XML 1.0 even escaped), then the XML-special characters escaped.
fn escape_text(raw: &str) -> String {
    escape(strip_control_chars(raw).as_ref()).into_owned()
}
