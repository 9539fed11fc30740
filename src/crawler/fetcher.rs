//! Static HTTP fetcher
//!
//! This module handles plain (non-rendered) HTTP requests, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests for page markup
//! - Error classification
//!
//! Provider classification reads static markup through [`MarkupSource`], and
//! the static rendering session uses it in place of a browser.

use crate::config::{FetchConfig, UserAgentConfig};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Failure to obtain static markup for a URL
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The request did not complete in time
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    /// Connection refused, DNS failure, TLS error
    #[error("Unreachable {url}: {message}")]
    Unreachable { url: String, message: String },

    /// The server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// The URL could not be turned into a request
    #[error("Invalid request URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// The response body could not be read
    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },
}

/// Something that can hand back the static markup of a URL
#[async_trait]
pub trait MarkupSource: Send + Sync {
    /// Fetches the markup at `url` without executing scripts
    async fn fetch_markup(&self, url: &str) -> Result<String, FetchError>;
}

/// Formats the crawler user agent: `Name/Version (+ContactURL; ContactEmail)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    )
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use petscout::config::{FetchConfig, UserAgentConfig};
/// use petscout::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    fetch: &FetchConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(user_agent))
        .timeout(Duration::from_secs(fetch.request_timeout_secs))
        .connect_timeout(Duration::from_secs(fetch.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// reqwest-backed [`MarkupSource`]
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from configuration
    pub fn new(user_agent: &UserAgentConfig, fetch: &FetchConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent, fetch)?,
        })
    }
}

#[async_trait]
impl MarkupSource for HttpFetcher {
    /// Fetches a URL with error classification
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | 2xx | body text |
    /// | Other status | `Status` |
    /// | Timeout | `Timeout` |
    /// | Connection refused / TLS | `Unreachable` |
    /// | Unparseable URL | `InvalidUrl` |
    async fn fetch_markup(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_send_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

fn classify_send_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_builder() {
        FetchError::InvalidUrl {
            url: url.to_string(),
            message: error.to_string(),
        }
    } else {
        FetchError::Unreachable {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(&UserAgentConfig::default(), &FetchConfig::default()).unwrap()
    }

    #[test]
    fn test_user_agent_format() {
        let config = UserAgentConfig {
            crawler_name: "TestScout".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        };
        assert_eq!(
            user_agent_string(&config),
            "TestScout/1.0 (+https://example.com/about; admin@example.com)"
        );
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&UserAgentConfig::default(), &FetchConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/adopt"))
            .and(header_exists("user-agent"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><body>Adopt</body></html>")
                    .insert_header("content-type", "text/html"),
            )
            .mount(&server)
            .await;

        let body = fetcher()
            .fetch_markup(&format!("{}/adopt", server.uri()))
            .await
            .unwrap();
        assert!(body.contains("Adopt"));
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = format!("{}/missing", server.uri());
        let err = fetcher().fetch_markup(&url).await.unwrap_err();
        assert_eq!(err, FetchError::Status { url, status: 404 });
    }

    #[tokio::test]
    async fn test_fetch_invalid_url() {
        let err = fetcher().fetch_markup("invalid-url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { ref url, .. } if url == "invalid-url"));
    }

    #[tokio::test]
    async fn test_fetch_unreachable() {
        // Port 9 (discard) is closed on test hosts
        let err = fetcher()
            .fetch_markup("http://127.0.0.1:9/")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FetchError::Unreachable { .. } | FetchError::Timeout { .. }
        ));
    }
}
