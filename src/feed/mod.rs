//! Feed synthesis pipeline.
//!
//! Turns a fetched page into an RSS 2.0 document in four steps:
//!
//! - [`pattern`] - substring-or-glob filtering of candidate links
//! - [`filename`] - item title and MIME type derivation
//! - [`extract`] - document-order link extraction from the DOM
//! - synthesis - channel/item emission as RSS 2.0 XML
//!
//! The whole pipeline is synchronous and read-only over the request's
//! immutable [`Document`](crate::dom::Document); the only await points in a
//! feed request live in the fetch layer.

pub mod extract;
pub mod filename;
pub mod pattern;
mod synth;

pub use extract::{extract_links, ResolvedLink};
pub use synth::{synthesize, DEFAULT_FEED_TITLE};
