//! Extension-to-MIME-type lookup.
//!
//! Feed enclosures carry a MIME type so podcast clients know what they are
//! downloading. The table is built once at startup, seeded with common web
//! and media types plus the registrations the service cares most about
//! (audiobook/podcast formats), and is read-only afterwards — request
//! handlers share it without locking.

use std::collections::HashMap;

use thiserror::Error;

/// Errors that can occur when registering a MIME type.
#[derive(Debug, Error)]
pub enum MimeError {
    /// The extension did not start with a dot (e.g. `mp3` instead of `.mp3`).
    #[error("extension must begin with '.': {0}")]
    InvalidExtension(String),
}

/// Common built-in mappings, keyed by lowercase extension including the dot.
const BUILTIN_TYPES: &[(&str, &str)] = &[
    (".aac", "audio/aac"),
    (".avif", "image/avif"),
    (".css", "text/css"),
    (".csv", "text/csv"),
    (".flac", "audio/flac"),
    (".gif", "image/gif"),
    (".htm", "text/html"),
    (".html", "text/html"),
    (".jpeg", "image/jpeg"),
    (".jpg", "image/jpeg"),
    (".js", "text/javascript"),
    (".json", "application/json"),
    (".m4b", "audio/mp4"),
    (".mkv", "video/x-matroska"),
    (".oga", "audio/ogg"),
    (".ogg", "audio/ogg"),
    (".opus", "audio/ogg"),
    (".pdf", "application/pdf"),
    (".png", "image/png"),
    (".svg", "image/svg+xml"),
    (".txt", "text/plain"),
    (".wav", "audio/wav"),
    (".webm", "video/webm"),
    (".webp", "image/webp"),
    (".xml", "text/xml"),
];

/// Formats registered at startup on top of the built-ins. `.m4a` in
/// particular is what audiobook directory listings are full of.
const MEDIA_TYPES: &[(&str, &str)] = &[
    (".mp3", "audio/mpeg"),
    (".m4a", "audio/x-m4a"),
    (".mp4", "video/mp4"),
    (".mov", "video/quicktime"),
];

/// Read-only extension→MIME lookup table.
#[derive(Debug, Clone)]
pub struct MimeTable {
    types: HashMap<String, String>,
}

impl MimeTable {
    /// Creates a table with the built-in mappings only.
    pub fn new() -> Self {
        let mut table = Self {
            types: HashMap::with_capacity(BUILTIN_TYPES.len() + MEDIA_TYPES.len()),
        };
        for (extension, mime_type) in BUILTIN_TYPES {
            table.insert(extension, mime_type);
        }
        table
    }

    /// Creates the table the service runs with: built-ins plus the
    /// podcast/audiobook media registrations.
    pub fn with_media_types() -> Self {
        let mut table = Self::new();
        for (extension, mime_type) in MEDIA_TYPES {
            table.insert(extension, mime_type);
        }
        table
    }

    /// Registers a mapping, overriding any existing one for the extension.
    ///
    /// # Errors
    ///
    /// Returns [`MimeError::InvalidExtension`] if `extension` does not begin
    /// with a dot.
    pub fn register(&mut self, extension: &str, mime_type: &str) -> Result<(), MimeError> {
        if !extension.starts_with('.') {
            return Err(MimeError::InvalidExtension(extension.to_owned()));
        }
        self.insert(extension, mime_type);
        Ok(())
    }

    /// Looks up the MIME type for an extension (including the dot).
    ///
    /// The exact spelling is tried first, then the lowercase form, so
    /// `.MP3` resolves without the table storing every case variant.
    pub fn lookup(&self, extension: &str) -> Option<&str> {
        if let Some(mime_type) = self.types.get(extension) {
            return Some(mime_type.as_str());
        }
        self.types
            .get(&extension.to_ascii_lowercase())
            .map(String::as_str)
    }

    fn insert(&mut self, extension: &str, mime_type: &str) {
        self.types
            .insert(extension.to_ascii_lowercase(), mime_type.to_owned());
    }
}

impl Default for MimeTable {
    fn default() -> Self {
        Self::new()
    }
}
