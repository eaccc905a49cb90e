//! Poller configuration.

use std::time::Duration;

use crate::error::ConfigError;

/// Default spacing between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Default bound on a single API request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Default API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.twitch.tv/kraken";

/// Default template used while the subject is live.
pub const DEFAULT_ONLINE_TEMPLATE: &str = "{name} is live!";

/// Default template used while the subject is offline.
pub const DEFAULT_OFFLINE_TEMPLATE: &str = "{name} is offline.";

/// Option keys that used to be recognized and are now ignored.
const DEPRECATED_OPTIONS: &[(&str, &str)] = &[("format_invalid", "obsolete")];

/// What a poll does when the display name cannot be resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IdentityPolicy {
    /// Fail the poll with an identity lookup error. No status request is made.
    #[default]
    Abort,
    /// Continue with an empty name and retry the lookup on the next poll.
    Blank,
}

/// Immutable configuration for a [`StatusPoller`](crate::StatusPoller).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollerConfig {
    subject_id: String,
    credential_id: String,
    poll_interval: Duration,
    online_template: String,
    offline_template: String,
    request_timeout: Duration,
    api_base_url: String,
    identity_policy: IdentityPolicy,
}

impl PollerConfig {
    /// Start building a config for the given subject and credential.
    #[must_use]
    pub fn builder(
        subject_id: impl Into<String>,
        credential_id: impl Into<String>,
    ) -> PollerConfigBuilder {
        PollerConfigBuilder {
            subject_id: Some(subject_id.into()),
            credential_id: Some(credential_id.into()),
            ..PollerConfigBuilder::default()
        }
    }

    /// Build a config from loose `key = value` options as a host would pass
    /// them through.
    ///
    /// Both the current option names and the legacy ones (`stream_name`,
    /// `client_id`, `cache_timeout`, `format`, `format_offline`) are accepted.
    /// Deprecated keys are ignored with a warning.
    ///
    /// # Errors
    /// Returns an error on unknown keys, unparsable values, or when a
    /// required option is missing.
    pub fn from_options<I, K, V>(options: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut builder = PollerConfigBuilder::default();

        for (key, value) in options {
            let key = key.as_ref();
            let value = value.into();
            builder = match key {
                "subject_id" | "stream_name" => builder.subject_id(value),
                "credential_id" | "client_id" => builder.credential_id(value),
                "poll_interval_seconds" | "cache_timeout" => {
                    builder.poll_interval(Duration::from_secs(parse_secs("poll_interval", &value)?))
                }
                "online_template" | "format" => builder.online_template(value),
                "offline_template" | "format_offline" => builder.offline_template(value),
                "request_timeout_seconds" => builder
                    .request_timeout(Duration::from_secs(parse_secs("request_timeout", &value)?)),
                "api_base_url" => builder.api_base_url(value),
                "identity_policy" => builder.identity_policy(parse_policy(&value)?),
                other => {
                    if let Some((_, msg)) = DEPRECATED_OPTIONS.iter().find(|(k, _)| *k == other) {
                        tracing::warn!(option = other, "ignoring deprecated option: {}", msg);
                        builder
                    } else {
                        return Err(ConfigError::UnknownOption(other.to_string()));
                    }
                }
            };
        }

        builder.build()
    }

    /// Identifier of the watched subject (channel login).
    #[must_use]
    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    /// Credential sent with every request.
    #[must_use]
    pub fn credential_id(&self) -> &str {
        &self.credential_id
    }

    /// Spacing the caller should leave between polls.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Template rendered while live.
    #[must_use]
    pub fn online_template(&self) -> &str {
        &self.online_template
    }

    /// Template rendered while offline.
    #[must_use]
    pub fn offline_template(&self) -> &str {
        &self.offline_template
    }

    /// Upper bound on a single request.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// API root, without a trailing slash.
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Identity failure policy.
    #[must_use]
    pub fn identity_policy(&self) -> IdentityPolicy {
        self.identity_policy
    }
}

/// Builder for [`PollerConfig`].
#[derive(Clone, Debug)]
pub struct PollerConfigBuilder {
    subject_id: Option<String>,
    credential_id: Option<String>,
    poll_interval: Duration,
    online_template: String,
    offline_template: String,
    request_timeout: Duration,
    api_base_url: String,
    identity_policy: IdentityPolicy,
}

impl Default for PollerConfigBuilder {
    fn default() -> Self {
        Self {
            subject_id: None,
            credential_id: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            online_template: DEFAULT_ONLINE_TEMPLATE.to_string(),
            offline_template: DEFAULT_OFFLINE_TEMPLATE.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            identity_policy: IdentityPolicy::default(),
        }
    }
}

impl PollerConfigBuilder {
    /// Set the watched subject.
    #[must_use]
    pub fn subject_id(mut self, id: impl Into<String>) -> Self {
        self.subject_id = Some(id.into());
        self
    }

    /// Set the request credential.
    #[must_use]
    pub fn credential_id(mut self, id: impl Into<String>) -> Self {
        self.credential_id = Some(id.into());
        self
    }

    /// Set the poll interval.
    #[must_use]
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the live template.
    #[must_use]
    pub fn online_template(mut self, template: impl Into<String>) -> Self {
        self.online_template = template.into();
        self
    }

    /// Set the offline template.
    #[must_use]
    pub fn offline_template(mut self, template: impl Into<String>) -> Self {
        self.offline_template = template.into();
        self
    }

    /// Set the per-request timeout.
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Point the poller at a different API root.
    #[must_use]
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Set the identity failure policy.
    #[must_use]
    pub fn identity_policy(mut self, policy: IdentityPolicy) -> Self {
        self.identity_policy = policy;
        self
    }

    /// Validate and freeze the configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingField`] when the subject or credential is
    /// absent or blank, and [`ConfigError::InvalidValue`] for a subject with
    /// characters outside `[A-Za-z0-9_]`, a zero interval, zero timeout or
    /// empty API root.
    pub fn build(self) -> Result<PollerConfig, ConfigError> {
        let subject_id = required("subject_id", self.subject_id)?;
        let credential_id = required("credential_id", self.credential_id)?;

        // Channel logins are word characters; anything else would change the URL
        if !subject_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ConfigError::InvalidValue {
                field: "subject_id",
                reason: format!("`{subject_id}` may only contain letters, digits and `_`"),
            });
        }

        if self.poll_interval < Duration::from_secs(1) {
            return Err(ConfigError::InvalidValue {
                field: "poll_interval",
                reason: "must be at least one second".to_string(),
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout",
                reason: "must be greater than zero".to_string(),
            });
        }

        let api_base_url = self.api_base_url.trim().trim_end_matches('/').to_string();
        if api_base_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must not be empty".to_string(),
            });
        }

        Ok(PollerConfig {
            subject_id,
            credential_id,
            poll_interval: self.poll_interval,
            online_template: self.online_template,
            offline_template: self.offline_template,
            request_timeout: self.request_timeout,
            api_base_url,
            identity_policy: self.identity_policy,
        })
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ConfigError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingField(field))
}

fn parse_secs(field: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
            field,
            reason: e.to_string(),
        })
}

fn parse_policy(value: &str) -> Result<IdentityPolicy, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "abort" => Ok(IdentityPolicy::Abort),
        "blank" => Ok(IdentityPolicy::Blank),
        other => Err(ConfigError::InvalidValue {
            field: "identity_policy",
            reason: format!("expected `abort` or `blank`, got `{other}`"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PollerConfig::builder("exotic_bug", "abc").build().unwrap();
        assert_eq!(config.subject_id(), "exotic_bug");
        assert_eq!(config.credential_id(), "abc");
        assert_eq!(config.poll_interval(), Duration::from_secs(60));
        assert_eq!(config.online_template(), "{name} is live!");
        assert_eq!(config.offline_template(), "{name} is offline.");
        assert_eq!(config.request_timeout(), DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(config.identity_policy(), IdentityPolicy::Abort);
    }

    #[test]
    fn test_missing_required_fields() {
        let err = PollerConfig::builder("", "abc").build().unwrap_err();
        assert_eq!(err, ConfigError::MissingField("subject_id"));

        let err = PollerConfig::builder("exotic_bug", "   ").build().unwrap_err();
        assert_eq!(err, ConfigError::MissingField("credential_id"));

        // Missing fields win even when other fields are also invalid.
        let err = PollerConfigBuilder::default()
            .poll_interval(Duration::ZERO)
            .credential_id("abc")
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingField("subject_id"));
    }

    #[test]
    fn test_invalid_values() {
        let err = PollerConfig::builder("a", "b")
            .poll_interval(Duration::from_millis(500))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "poll_interval", .. }));

        let err = PollerConfig::builder("a", "b")
            .request_timeout(Duration::ZERO)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "request_timeout", .. }));

        let err = PollerConfig::builder("a", "b").api_base_url(" / ").build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "api_base_url", .. }));
    }

    #[test]
    fn test_subject_with_url_syntax_rejected() {
        for subject in ["exotic_bug?x=1#y", "exotic_bug/../users", "exotic bug", "bug%2F"] {
            let err = PollerConfig::builder(subject, "abc").build().unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue { field: "subject_id", .. }),
                "{subject} accepted"
            );
        }

        let config = PollerConfig::builder(" Exotic_Bug42 ", "abc").build().unwrap();
        assert_eq!(config.subject_id(), "Exotic_Bug42");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = PollerConfig::builder("a", "b")
            .api_base_url("http://127.0.0.1:8080/")
            .build()
            .unwrap();
        assert_eq!(config.api_base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_from_options_legacy_names() {
        let config = PollerConfig::from_options([
            ("stream_name", "exotic_bug"),
            ("client_id", "abc"),
            ("cache_timeout", "30"),
            ("format", "{stream_name} LIVE"),
            ("format_offline", "{stream_name} away"),
            ("format_invalid", "whatever"),
        ])
        .unwrap();

        assert_eq!(config.subject_id(), "exotic_bug");
        assert_eq!(config.poll_interval(), Duration::from_secs(30));
        assert_eq!(config.online_template(), "{stream_name} LIVE");
        assert_eq!(config.offline_template(), "{stream_name} away");
    }

    #[test]
    fn test_from_options_errors() {
        let err = PollerConfig::from_options([("client_id", "abc")]).unwrap_err();
        assert_eq!(err, ConfigError::MissingField("subject_id"));

        let err = PollerConfig::from_options([("subject_id", "a"), ("colour", "red")]).unwrap_err();
        assert_eq!(err, ConfigError::UnknownOption("colour".to_string()));

        let err = PollerConfig::from_options([("poll_interval_seconds", "soon")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "poll_interval", .. }));

        let err = PollerConfig::from_options([
            ("subject_id", "a"),
            ("credential_id", "b"),
            ("identity_policy", "retry"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "identity_policy", .. }));
    }

    #[test]
    fn test_from_options_policy() {
        let config = PollerConfig::from_options([
            ("subject_id", "a"),
            ("credential_id", "b"),
            ("identity_policy", "Blank"),
            ("request_timeout_seconds", "2"),
        ])
        .unwrap();
        assert_eq!(config.identity_policy(), IdentityPolicy::Blank);
        assert_eq!(config.request_timeout(), Duration::from_secs(2));
    }
}
