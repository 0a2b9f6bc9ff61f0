//! pagecast — turn any HTML page of links into a podcast feed.
//!
//! pagecast is a small HTTP service: point it at a page URL (say, a
//! directory listing of audiobook files), optionally give it a link filter,
//! and it answers with an RSS 2.0 feed whose items are enclosures for the
//! matching links. Any feed reader or podcast client can then subscribe to
//! a plain page of files.
//!
//! # Architecture
//!
//! ```text
//! GET /feed?page=…&pattern=…
//!        │
//!        ▼
//!   fetch::fetch_page ──▶ dom::Document + base Url
//!        │
//!        ▼
//!   feed::synthesize ──▶ RSS 2.0 XML
//!     (extract ▸ pattern ▸ filename, per link)
//! ```
//!
//! Every request is handled independently: the fetched document is
//! immutable and request-scoped, and the only process-wide structure (the
//! extension→MIME table) is read-only after startup, so the pipeline needs
//! no locking.

pub mod dom;
pub mod feed;
pub mod fetch;
pub mod mime;
pub mod server;
pub mod util;
