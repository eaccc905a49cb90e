//! Outbound HTTP seam.
//!
//! The poller only needs authenticated GETs that come back as JSON, so the
//! client is hidden behind [`HttpClient`]. [`ReqwestClient`] is the default
//! implementation; tests substitute their own.

use std::time::Duration;

use crate::error::FetchError;

/// A decoded API response.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Parsed JSON body.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Create a response.
    #[must_use]
    pub fn new(status: u16, body: serde_json::Value) -> Self {
        Self { status, body }
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues authenticated GET requests.
pub trait HttpClient: Send + Sync {
    /// GET `url` with extra `headers` and parse the body as JSON.
    ///
    /// Non-2xx responses are returned as values; only transport and decode
    /// failures are errors.
    ///
    /// # Errors
    /// Returns [`FetchError::Timeout`], [`FetchError::Transport`] or
    /// [`FetchError::Decode`].
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, FetchError>;
}

/// Blocking [`reqwest`] client with a bounded per-request timeout.
#[derive(Clone, Debug)]
pub struct ReqwestClient {
    inner: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Create a client whose requests give up after `timeout`.
    ///
    /// # Errors
    /// Returns [`FetchError::Transport`] if the TLS backend cannot be set up.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let inner = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, FetchError> {
        let mut request = self.inner.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let text = response.text().map_err(map_reqwest_error)?;

        // Error pages are often not JSON; keep the status, drop the body.
        let body = match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(body) => body,
            Err(_) if !(200..300).contains(&status) => serde_json::Value::Null,
            Err(e) => return Err(FetchError::Decode(e.to_string())),
        };

        Ok(HttpResponse { status, body })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(e.to_string())
    }
}
