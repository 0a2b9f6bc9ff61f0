//! HTTP routes and handlers.
//!
//! Two routes: `/` serves the embedded feed-builder page, and `/feed` runs
//! the fetch-extract-synthesize pipeline for one request. Requests are
//! independent — the only shared state is the HTTP client's connection pool
//! and the read-only MIME table, so handlers never lock anything.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::feed::synthesize;
use crate::fetch::fetch_page;
use crate::mime::MimeTable;
use crate::util::validate_page_url;

/// Format of the `update` freshness stamp (e.g. `20260807153000`).
const UPDATE_FORMAT: &str = "%Y%m%d%H%M%S";

/// Feed URLs carrying a stamp further than this from the current time are
/// answered with 404, so stale bookmarked URLs drop out of feed readers
/// instead of hitting the upstream page forever.
const MAX_UPDATE_AGE_SECS: i64 = 5 * 60 * 60;

/// Embedded index page; `{{update}}` is replaced with the current stamp.
const INDEX_TEMPLATE: &str = include_str!("index.html");

/// Shared per-process state for request handlers.
#[derive(Clone)]
pub struct AppState {
    /// HTTP client reused across requests (connection pooling).
    client: reqwest::Client,
    /// Read-only extension→MIME table, built once at startup.
    mime: Arc<MimeTable>,
}

impl AppState {
    /// Creates the handler state from a client and a fully-registered table.
    pub fn new(client: reqwest::Client, mime: MimeTable) -> Self {
        Self {
            client,
            mime: Arc::new(mime),
        }
    }
}

/// Builds the application router: `/` (feed-builder page) and `/feed`.
/// Any other path gets the default 404.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/feed", get(feed_handler))
        .with_state(state)
}

/// Query parameters accepted by `GET /feed`.
#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    /// URL of the page to turn into a feed.
    #[serde(default)]
    page: String,
    /// Optional substring-or-glob link filter.
    #[serde(default)]
    pattern: String,
    /// Optional freshness stamp embedded by the index page when the feed
    /// URL was generated.
    #[serde(default)]
    update: String,
}

/// `GET /feed` — fetch the requested page and answer with the synthesized
/// RSS document.
///
/// Every failure (stale stamp, missing or invalid page URL, fetch error) is
/// a 404 with a short reason; a page that fetches but yields no matching
/// links is still a valid, empty feed.
async fn feed_handler(State(state): State<AppState>, Query(params): Query<FeedQuery>) -> Response {
    if is_outdated(&params.update, Utc::now()) {
        return (StatusCode::NOT_FOUND, "Outdated").into_response();
    }

    if params.page.is_empty() {
        return (StatusCode::NOT_FOUND, "Bad page url").into_response();
    }

    let page_url = match validate_page_url(&params.page) {
        Ok(url) => url,
        Err(e) => {
            warn!(page = %params.page, error = %e, "Rejecting feed request");
            return (StatusCode::NOT_FOUND, e.to_string()).into_response();
        }
    };

    let fetched = match fetch_page(&state.client, &page_url).await {
        Ok(fetched) => fetched,
        Err(e) => {
            warn!(page = %page_url, error = %e, "Page fetch failed");
            return (StatusCode::NOT_FOUND, e.to_string()).into_response();
        }
    };

    debug!(page = %page_url, base = %fetched.base_url, pattern = %params.pattern, "Synthesizing feed");
    let feed = synthesize(
        Some(&fetched.document),
        &params.pattern,
        &fetched.base_url,
        &state.mime,
    );

    (
        [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
        feed,
    )
        .into_response()
}

/// `GET /` — the feed-builder form with a fresh `update` stamp baked in.
async fn index_handler() -> Html<String> {
    let stamp = Utc::now().format(UPDATE_FORMAT).to_string();
    Html(INDEX_TEMPLATE.replace("{{update}}", &stamp))
}

/// Checks the optional freshness stamp against `now`.
///
/// Stamps more than [`MAX_UPDATE_AGE_SECS`] from `now` in either direction
/// are stale. Empty or unparseable stamps are ignored — the parameter is a
/// convenience for the index page, not an auth token.
fn is_outdated(update: &str, now: DateTime<Utc>) -> bool {
    if update.is_empty() {
        return false;
    }
    let Ok(stamp) = NaiveDateTime::parse_from_str(update, UPDATE_FORMAT) else {
        return false;
    };
    let age = now.signed_duration_since(stamp.and_utc());
    age.num_seconds().abs() > MAX_UPDATE_AGE_SECS
}
