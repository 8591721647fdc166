//! Feed fetcher: one GET, fatal on any failure.

use std::time::Duration;
use thiserror::Error;

use super::FeedDocument;
use crate::http::{HttpClient, HttpError};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed request failed")]
    Transport(#[from] HttpError),
    #[error("feed {url} returned HTTP {status}")]
    Status { url: String, status: u32 },
    #[error("feed {url} is not valid JSON")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Downloads and parses the feed at `url`.
pub fn fetch_feed(
    client: &dyn HttpClient,
    url: &str,
    timeout: Duration,
) -> Result<FeedDocument, FeedError> {
    let resp = client.get(url, timeout)?;
    if !resp.is_success() {
        return Err(FeedError::Status {
            url: url.to_string(),
            status: resp.status,
        });
    }
    let feed = FeedDocument::parse(&resp.body).map_err(|source| FeedError::Json {
        url: url.to_string(),
        source,
    })?;
    tracing::debug!(url, bytes = resp.body.len(), "fetched feed");
    Ok(feed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::fake::FakeClient;

    const URL: &str = "https://feed.example/TFEL-Emby.json";

    #[test]
    fn parses_success_body() {
        let client = FakeClient::default().with(URL, 200, br#"{"icons":[{"url":"https://h/a.png"}]}"#);
        let feed = fetch_feed(&client, URL, Duration::from_secs(30)).unwrap();
        assert_eq!(feed.items().len(), 1);
    }

    #[test]
    fn non_success_status_is_fatal() {
        let client = FakeClient::default().with(URL, 503, b"busy");
        let err = fetch_feed(&client, URL, Duration::from_secs(30)).unwrap_err();
        assert!(matches!(err, FeedError::Status { status: 503, .. }));
    }

    #[test]
    fn invalid_json_is_fatal() {
        let client = FakeClient::default().with(URL, 200, b"<html>");
        let err = fetch_feed(&client, URL, Duration::from_secs(30)).unwrap_err();
        assert!(matches!(err, FeedError::Json { .. }));
    }

    #[test]
    fn transport_error_is_fatal() {
        let client = FakeClient::default();
        let err = fetch_feed(&client, URL, Duration::from_secs(30)).unwrap_err();
        assert!(matches!(err, FeedError::Transport(_)));
    }
}
