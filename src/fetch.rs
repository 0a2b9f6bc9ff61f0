//! Page fetching.
//!
//! The one network-touching step of a feed request: GET the requested page,
//! bound the response in time and size, and hand the parsed document plus
//! its final (post-redirect) URL to the synthesis pipeline. On any failure
//! here the pipeline is never invoked — the handler reports the error
//! directly.

use std::time::Duration;

use futures::StreamExt;
use thiserror::Error;
use url::Url;

use crate::dom::{parse_document, Document};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_PAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Errors that can occur while fetching the source page.
#[derive(Debug, Error)]
pub enum PageFetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the 30-second timeout
    #[error("Request timed out")]
    Timeout,
    /// Response body exceeded the 10MB size limit
    #[error("Response too large")]
    TooLarge,
}

/// A fetched, parsed page together with the base URL for resolving its links.
#[derive(Debug)]
pub struct FetchedPage {
    /// The parsed document tree.
    pub document: Document,
    /// The response's final URL after redirects. Relative links on the page
    /// resolve against this, not against the URL originally requested.
    pub base_url: Url,
}

/// Fetches one page and parses it into an immutable document.
///
/// The request has a 30-second timeout and the body is read with a 10MB
/// size limit. Parsing itself cannot fail — the HTML parser recovers from
/// any input — so every error from this function is a transport-level one.
///
/// # Errors
///
/// - [`PageFetchError::Timeout`] - request exceeded 30 seconds
/// - [`PageFetchError::Network`] - connection, DNS or TLS failure
/// - [`PageFetchError::HttpStatus`] - non-2xx response
/// - [`PageFetchError::TooLarge`] - body exceeded 10MB
pub async fn fetch_page(
    client: &reqwest::Client,
    url: &Url,
) -> Result<FetchedPage, PageFetchError> {
    let response = tokio::time::timeout(FETCH_TIMEOUT, client.get(url.clone()).send())
        .await
        .map_err(|_| PageFetchError::Timeout)?
        .map_err(PageFetchError::Network)?;

    if !response.status().is_success() {
        return Err(PageFetchError::HttpStatus(response.status().as_u16()));
    }

    // The final URL must be captured before the body stream consumes the
    // response; it differs from the requested URL when redirects happened.
    let base_url = response.url().clone();

    let bytes = read_limited_bytes(response, MAX_PAGE_SIZE).await?;
    let document = parse_document(&String::from_utf8_lossy(&bytes));

    Ok(FetchedPage { document, base_url })
}

/// Reads a response body with a size limit using stream-based reading.
async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, PageFetchError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(PageFetchError::TooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(PageFetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(PageFetchError::TooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const INDEX_PAGE: &str = "<html><head><title>My Library</title></head>\
                              <body><a href=\"track1.mp4\">Track One</a></body></html>";

    #[tokio::test]
    async fn test_fetch_parses_page_and_reports_base() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lib/index.html"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(INDEX_PAGE)
                    .insert_header("Content-Type", "text/html"),
            )
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let url = Url::parse(&format!("{}/lib/index.html", mock_server.uri())).unwrap();
        let page = fetch_page(&client, &url).await.unwrap();

        assert_eq!(page.base_url, url);
        let title = page
            .document
            .first_element("html")
            .and_then(|html| html.first_child_element("head"))
            .and_then(|head| head.first_child_element("title"))
            .map(|t| t.first_text().to_owned());
        assert_eq!(title.as_deref(), Some("My Library"));
    }

    #[tokio::test]
    async fn test_fetch_reports_post_redirect_base_url() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("Location", format!("{}/new/", mock_server.uri()).as_str()),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(INDEX_PAGE))
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let url = Url::parse(&format!("{}/old", mock_server.uri())).unwrap();
        let page = fetch_page(&client, &url).await.unwrap();

        // Relative links must resolve against where the page actually lives.
        assert_eq!(
            page.base_url.as_str(),
            format!("{}/new/", mock_server.uri())
        );
    }

    #[tokio::test]
    async fn test_fetch_non_2xx_is_an_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let url = Url::parse(&format!("{}/missing", mock_server.uri())).unwrap();
        let result = fetch_page(&client, &url).await;

        match result {
            Err(PageFetchError::HttpStatus(404)) => {}
            other => panic!("Expected HttpStatus(404), got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_body_over_limit_is_rejected() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(64)))
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let response = client.get(mock_server.uri()).send().await.unwrap();
        let result = read_limited_bytes(response, 16).await;

        assert!(matches!(result, Err(PageFetchError::TooLarge)));
    }

    #[tokio::test]
    async fn test_body_within_limit_is_read_fully() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let response = client.get(mock_server.uri()).send().await.unwrap();
        let bytes = read_limited_bytes(response, 16).await.unwrap();

        assert_eq!(bytes, b"hello");
    }
}
