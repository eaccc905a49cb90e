//! Request shapes for the streaming API.

use crate::config::PollerConfig;

/// Header carrying the credential on every request.
pub const CREDENTIAL_HEADER: &str = "Client-ID";

/// Field holding the display name in a user lookup.
pub const DISPLAY_NAME_FIELD: &str = "display_name";

/// Field that is non-null while the subject is live.
pub const STREAM_FIELD: &str = "stream";

/// Subject-scoped endpoints derived from a config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiEndpoints {
    user_url: String,
    stream_url: String,
    credential: String,
}

impl ApiEndpoints {
    /// Build the endpoints for the config's subject.
    #[must_use]
    pub fn new(config: &PollerConfig) -> Self {
        let base = config.api_base_url();
        let subject = config.subject_id();
        Self {
            user_url: format!("{base}/users/{subject}"),
            stream_url: format!("{base}/streams/{subject}"),
            credential: config.credential_id().to_string(),
        }
    }

    /// Identity lookup URL.
    #[must_use]
    pub fn user_url(&self) -> &str {
        &self.user_url
    }

    /// Live status lookup URL.
    #[must_use]
    pub fn stream_url(&self) -> &str {
        &self.stream_url
    }

    /// Headers to attach to either request.
    #[must_use]
    pub fn headers(&self) -> [(&str, &str); 1] {
        [(CREDENTIAL_HEADER, self.credential.as_str())]
    }
}

/// Returns true if a status body carries a live stream record.
#[must_use]
pub fn has_stream_record(body: &serde_json::Value) -> bool {
    body.get(STREAM_FIELD).is_some_and(|stream| !stream.is_null())
}
