use thiserror::Error;
use url::Url;

/// Errors that can occur when validating a requested page URL.
#[derive(Debug, Error)]
pub enum UrlValidationError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
}

/// Validates a URL string for use as a feed source page.
///
/// Only the scheme is policed: `http` and `https` pages can be fetched;
/// anything else (`file://`, `ftp://`, `javascript:`) is rejected before a
/// request is made. Hosts are deliberately unrestricted — pointing the
/// service at a NAS or another machine on the local network is its primary
/// use.
///
/// # Errors
///
/// Returns [`UrlValidationError`] if the URL cannot be parsed or uses a
/// non-HTTP(S) scheme.
pub fn validate_page_url(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str)?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }
}
