//! Error types for the streamwatch crate.

use thiserror::Error;

/// Result type alias using streamwatch's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a [`PollerConfig`](crate::PollerConfig).
///
/// These are fatal: a poller cannot be constructed without a valid config.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required option is absent or empty.
    #[error("missing {0}")]
    MissingField(&'static str),

    /// An option has a value outside its accepted range.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Option name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// An option key that is neither current nor deprecated.
    #[error("unknown option: {0}")]
    UnknownOption(String),
}

/// Failure of a single outbound API request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request did not complete within the client timeout.
    #[error("request timed out")]
    Timeout,

    /// Connection, TLS or protocol failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The API answered with a non-2xx status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The body was not valid JSON.
    #[error("malformed response body: {0}")]
    Decode(String),

    /// The body was JSON but lacked an expected field.
    #[error("response is missing field `{0}`")]
    MissingField(&'static str),
}

/// Errors that can occur in streamwatch operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Resolving the subject's display name failed.
    #[error("identity lookup failed: {0}")]
    IdentityLookup(#[source] FetchError),

    /// Looking up the subject's live status failed.
    #[error("status lookup failed: {0}")]
    Poll(#[source] FetchError),
}

impl Error {
    /// The underlying request failure, if this error came from the network.
    #[must_use]
    pub fn fetch_error(&self) -> Option<&FetchError> {
        match self {
            Self::Config(_) => None,
            Self::IdentityLookup(e) | Self::Poll(e) => Some(e),
        }
    }
}
