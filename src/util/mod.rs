//! Utility functions for common operations.
//!
//! - **URL validation**: scheme checks for user-supplied page URLs
//! - **Text sanitation**: control-character stripping for feed-bound text

mod text;
mod url_validator;

pub use text::strip_control_chars;
pub use url_validator::{validate_page_url, UrlValidationError};
