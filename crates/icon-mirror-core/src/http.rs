//! Blocking HTTP GET over libcurl.
//!
//! The feed fetch and every image download go through [`HttpClient`] so the
//! mirror stages can be driven by a fake client in tests.

use std::time::Duration;
use thiserror::Error;

const MAX_REDIRECTS: u32 = 10;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport-level failure: DNS, connect, TLS, timeout, or a broken transfer.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("GET {url}: {source}")]
    Curl {
        url: String,
        #[source]
        source: curl::Error,
    },
}

/// Complete response of a GET. Non-2xx statuses are returned to the caller
/// rather than turned into errors, since feed and image handling judge them differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait HttpClient {
    fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, HttpError>;
}

/// libcurl easy-handle client. One handle per request; the job is sequential.
#[derive(Debug, Clone)]
pub struct CurlClient {
    user_agent: String,
}

impl CurlClient {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }

    fn perform(&self, url: &str, timeout: Duration) -> Result<HttpResponse, curl::Error> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(MAX_REDIRECTS)?;
        easy.useragent(&self.user_agent)?;
        easy.connect_timeout(CONNECT_TIMEOUT.min(timeout))?;
        easy.timeout(timeout)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        Ok(HttpResponse { status, body })
    }
}

impl Default for CurlClient {
    fn default() -> Self {
        Self::new(concat!("icon-mirror/", env!("CARGO_PKG_VERSION")))
    }
}

impl HttpClient for CurlClient {
    fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, HttpError> {
        tracing::debug!(url, timeout_secs = timeout.as_secs(), "GET");
        self.perform(url, timeout).map_err(|source| HttpError::Curl {
            url: url.to_string(),
            source,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range() {
        let ok = HttpResponse {
            status: 204,
            body: Vec::new(),
        };
        assert!(ok.is_success());
        let not_found = HttpResponse {
            status: 404,
            body: Vec::new(),
        };
        assert!(!not_found.is_success());
    }

    #[test]
    fn unreachable_host_is_transport_error() {
        let client = CurlClient::default();
        // Port 9 on loopback is discard; nothing listens there in test environments.
        let err = client
            .get("http://127.0.0.1:9/feed.json", Duration::from_secs(2))
            .unwrap_err();
        assert!(err.to_string().contains("127.0.0.1:9"));
    }
}
