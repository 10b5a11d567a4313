//! Client for the remote shortening endpoint.
//!
//! The endpoint answers a GET carrying `url=<long url>` with the short URL as
//! plain text. It also answers some failures with a plain-text message and a
//! success status, so the body is only accepted when it parses as an absolute
//! http(s) URL.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use thiserror::Error;
use tracing::debug;

/// TinyURL's plain-text creation API.
pub const DEFAULT_ENDPOINT: &str = "http://tinyurl.com/api-create.php";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ShortenError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to shortening service failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("failed to read response from shortening service: {0}")]
    Body(#[source] reqwest::Error),

    #[error("shortening service returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("shortening service did not return a URL: {0:?}")]
    ShortenFailed(String),
}

/// Something that turns a long URL into a short one.
pub trait Shortener {
    fn shorten(&self, long_url: &str) -> Result<String, ShortenError>;
}

/// Blocking HTTP client for a TinyURL-style endpoint.
#[derive(Debug, Clone)]
pub struct HttpShortener {
    client: Client,
    endpoint: String,
}

impl HttpShortener {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ShortenError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ShortenError::Client)?;
        Ok(Self::with_client(client, endpoint))
    }

    /// Use a preconfigured client (proxy settings, TLS roots, ...).
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Shortener for HttpShortener {
    fn shorten(&self, long_url: &str) -> Result<String, ShortenError> {
        debug!(endpoint = %self.endpoint, url = long_url, "requesting short URL");
        let res = self
            .client
            .get(&self.endpoint)
            .query(&[("url", long_url)])
            .send()
            .map_err(ShortenError::Request)?;

        let status = res.status();
        let body = res.text().map_err(ShortenError::Body)?;
        debug!(%status, bytes = body.len(), "shortening service responded");

        if !status.is_success() {
            return Err(ShortenError::Status {
                status,
                body: body.trim().to_string(),
            });
        }
        validate_short_url(&body)
    }
}

/// Accept `body` only if it is an absolute http(s) URL with a host.
///
/// Surrounding whitespace is dropped; anything else is reported as
/// `ShortenFailed` carrying the original text.
pub fn validate_short_url(body: &str) -> Result<String, ShortenError> {
    let candidate = body.trim();
    match Url::parse(candidate) {
        Ok(url)
            if matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|h| !h.is_empty()) =>
        {
            Ok(candidate.to_string())
        }
        _ => Err(ShortenError::ShortenFailed(body.to_string())),
    }
}
