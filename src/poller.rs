//! Status poller - resolves a subject's display name once and checks its
//! live status on every tick.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};

use crate::api::{self, ApiEndpoints};
use crate::config::{IdentityPolicy, PollerConfig};
use crate::error::{Error, FetchError, Result};
use crate::http::{HttpClient, ReqwestClient};
use crate::template::safe_format;

/// Color class of a poll outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusColor {
    /// Subject is live.
    Good,
    /// Subject is offline.
    Bad,
}

/// Outcome of a single tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollResult {
    /// Whether the subject is live.
    pub is_active: bool,
    /// Rendered template.
    pub display_text: String,
    /// Color to show the text in.
    pub color: StatusColor,
    /// The caller should not poll again before this instant.
    pub valid_until: DateTime<Utc>,
}

/// Polls a streaming API for one subject.
///
/// The display name is the only state carried between polls. It is guarded by
/// a mutex held across the check and the lookup, so concurrent callers share
/// a single identity request.
pub struct StatusPoller<C = ReqwestClient> {
    config: PollerConfig,
    endpoints: ApiEndpoints,
    client: C,
    identity: Mutex<Option<String>>,
}

impl StatusPoller<ReqwestClient> {
    /// Create a poller backed by a blocking reqwest client using the
    /// config's request timeout.
    ///
    /// # Errors
    /// Returns [`Error::Poll`] with a transport error if the HTTP client
    /// cannot be built.
    pub fn new(config: PollerConfig) -> Result<Self> {
        let client = ReqwestClient::new(config.request_timeout()).map_err(Error::Poll)?;
        Ok(Self::with_client(config, client))
    }
}

impl<C: HttpClient> StatusPoller<C> {
    /// Create a poller using the given HTTP client.
    #[must_use]
    pub fn with_client(config: PollerConfig, client: C) -> Self {
        Self {
            endpoints: ApiEndpoints::new(&config),
            config,
            client,
            identity: Mutex::new(None),
        }
    }

    /// The poller's configuration.
    #[must_use]
    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// The cached display name, if one has been resolved.
    #[must_use]
    pub fn identity(&self) -> Option<String> {
        self.identity_guard().clone()
    }

    /// Forget the cached display name so the next poll resolves it again.
    pub fn invalidate_identity(&self) {
        *self.identity_guard() = None;
    }

    /// Look up the subject's display name.
    ///
    /// Always performs a request; caching is left to [`poll`](Self::poll).
    ///
    /// # Errors
    /// Returns [`Error::IdentityLookup`] on transport failure, non-2xx status,
    /// malformed JSON or a missing `display_name` field.
    pub fn resolve_identity(&self) -> Result<String> {
        let body = self
            .fetch(self.endpoints.user_url())
            .map_err(Error::IdentityLookup)?;

        body.get(api::DISPLAY_NAME_FIELD)
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .ok_or(Error::IdentityLookup(FetchError::MissingField(
                api::DISPLAY_NAME_FIELD,
            )))
    }

    /// Run one tick using the system clock.
    ///
    /// # Errors
    /// See [`poll_at`](Self::poll_at).
    pub fn poll(&self) -> Result<PollResult> {
        self.poll_at(Utc::now())
    }

    /// Run one tick, computing `valid_until` from `now`.
    ///
    /// An offline subject is a successful result with `is_active == false`.
    ///
    /// # Errors
    /// Returns [`Error::IdentityLookup`] if the display name is unresolved and
    /// its lookup fails under [`IdentityPolicy::Abort`]; no status request is
    /// made in that case. Returns [`Error::Poll`] if the status lookup fails.
    pub fn poll_at(&self, now: DateTime<Utc>) -> Result<PollResult> {
        let name = self.cached_or_resolve()?;

        let body = self
            .fetch(self.endpoints.stream_url())
            .map_err(Error::Poll)?;
        let is_active = api::has_stream_record(&body);
        tracing::trace!(subject = self.config.subject_id(), is_active, "status lookup");

        let (template, color) = if is_active {
            (self.config.online_template(), StatusColor::Good)
        } else {
            (self.config.offline_template(), StatusColor::Bad)
        };

        let name = name.as_deref();
        let display_text = safe_format(template, &[("name", name), ("stream_name", name)]);

        Ok(PollResult {
            is_active,
            display_text,
            color,
            valid_until: self.valid_until(now),
        })
    }

    fn cached_or_resolve(&self) -> Result<Option<String>> {
        let mut identity = self.identity_guard();
        if let Some(name) = identity.as_ref() {
            return Ok(Some(name.clone()));
        }

        match self.resolve_identity() {
            Ok(name) => {
                tracing::debug!(subject = self.config.subject_id(), %name, "resolved display name");
                *identity = Some(name.clone());
                Ok(Some(name))
            }
            Err(e) => match self.config.identity_policy() {
                IdentityPolicy::Abort => Err(e),
                IdentityPolicy::Blank => {
                    tracing::debug!(
                        subject = self.config.subject_id(),
                        "continuing without display name: {}",
                        e
                    );
                    Ok(None)
                }
            },
        }
    }

    fn fetch(&self, url: &str) -> std::result::Result<serde_json::Value, FetchError> {
        let response = self.client.get(url, &self.endpoints.headers())?;
        if !response.is_success() {
            return Err(FetchError::Status(response.status));
        }
        Ok(response.body)
    }

    fn valid_until(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        TimeDelta::from_std(self.config.poll_interval())
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    fn identity_guard(&self) -> MutexGuard<'_, Option<String>> {
        self.identity.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C> std::fmt::Debug for StatusPoller<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusPoller")
            .field("subject_id", &self.config.subject_id())
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}
