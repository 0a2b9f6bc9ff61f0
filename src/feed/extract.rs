//! Link extraction from a parsed page.

use url::Url;

use crate::dom::Node;
use crate::mime::MimeTable;

use super::{filename, pattern};

/// A link selected for the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    /// Absolute URL of the linked resource (resolution against the page's
    /// base URL has already happened — a relative link never leaves this
    /// module).
    pub url: Url,
    /// Display title derived from the anchor text or the URL path.
    pub title: String,
    /// Best-guess MIME type for the enclosure; `""` when unknown.
    pub mime_type: String,
}

/// Collects every matching link under `body`, in document order.
///
/// Walks the subtree depth-first. Each `href` attribute of each `a` element
/// is one candidate — a malformed anchor carrying several `href` attributes
/// yields one candidate per attribute, all sharing the anchor's text (the
/// first immediate text child). Candidates with an empty or unresolvable
/// href are dropped silently; the rest are filtered by `filter` and derived
/// into [`ResolvedLink`]s.
///
/// `body` being `None` (page without a body element) yields no links rather
/// than an error.
pub fn extract_links(
    body: Option<&Node>,
    filter: &str,
    base: &Url,
    table: &MimeTable,
) -> Vec<ResolvedLink> {
    let mut links = Vec::new();
    if let Some(root) = body {
        collect(root, filter, base, table, &mut links);
    }
    links
}

fn collect(node: &Node, filter: &str, base: &Url, table: &MimeTable, out: &mut Vec<ResolvedLink>) {
    if let Node::Element { name, attrs, .. } = node {
        if name == "a" {
            let anchor_text = node.first_text();
            for (key, value) in attrs {
                if key != "href" {
                    continue;
                }
                let Some(resolved) = resolve_href(base, value) else {
                    continue;
                };
                if pattern::matches(filter, &resolved) {
                    let (title, mime_type) = filename::derive(resolved.path(), anchor_text, table);
                    out.push(ResolvedLink {
                        url: resolved,
                        title,
                        mime_type,
                    });
                }
            }
        }
    }

    // Descend into every child, anchors included: pages nest links inside
    // arbitrary markup, and text nodes are walked (and contribute nothing).
    for child in node.children() {
        collect(child, filter, base, table, out);
    }
}

/// Resolves a possibly-relative href against the page's base URL.
///
/// Empty and unparseable hrefs resolve to `None` and the candidate is
/// skipped; scheme-relative, path-relative, fragment-only and absolute
/// references all resolve normally.
pub(crate) fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    if href.is_empty() {
        return None;
    }
    base.join(href).ok()
}
