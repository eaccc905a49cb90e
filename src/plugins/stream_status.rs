//! Stream status plugin - shows whether a channel is live.

use chrono::{DateTime, TimeDelta, Utc};
use ratatui::style::Style;

use crate::error::Error;
use crate::http::{HttpClient, ReqwestClient};
use crate::plugins::{Plugin, PluginConfig, PluginError, PluginResult};
use crate::poller::{StatusColor, StatusPoller};
use crate::status_bar::StatusBarSegment;

/// What to show after a failed refresh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StalePolicy {
    /// Replace the segment with an error indicator.
    #[default]
    SurfaceError,
    /// Keep showing the last successful segment, if there is one.
    KeepLast,
}

/// Plugin that renders a [`StatusPoller`]'s latest result.
pub struct StreamStatusPlugin<C = ReqwestClient> {
    poller: StatusPoller<C>,
    stale_policy: StalePolicy,
    good_style: Style,
    bad_style: Style,
    last_good: Option<StatusBarSegment>,
    last_error: Option<Error>,
    next_refresh: Option<DateTime<Utc>>,
}

impl<C: HttpClient> StreamStatusPlugin<C> {
    /// Wrap a poller.
    #[must_use]
    pub fn new(poller: StatusPoller<C>) -> Self {
        Self {
            poller,
            stale_policy: StalePolicy::default(),
            good_style: StatusColor::Good.style(),
            bad_style: StatusColor::Bad.style(),
            last_good: None,
            last_error: None,
            next_refresh: None,
        }
    }

    /// Set the stale policy.
    #[must_use]
    pub fn stale_policy(mut self, policy: StalePolicy) -> Self {
        self.stale_policy = policy;
        self
    }

    /// Override the live and offline styles.
    #[must_use]
    pub fn styles(mut self, good: Style, bad: Style) -> Self {
        self.good_style = good;
        self.bad_style = bad;
        self
    }

    /// The wrapped poller.
    #[must_use]
    pub fn poller(&self) -> &StatusPoller<C> {
        &self.poller
    }

    /// Error from the most recent refresh, if it failed.
    #[must_use]
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// Whether the host should refresh at `now`.
    ///
    /// True before the first refresh and once the last result has expired. A
    /// failed refresh waits one poll interval before the next attempt.
    #[must_use]
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        self.next_refresh.map_or(true, |at| now >= at)
    }

    /// Refresh with an explicit clock.
    ///
    /// # Errors
    /// Returns the poll error after recording it for [`render`](Plugin::render).
    pub fn refresh_at(&mut self, now: DateTime<Utc>) -> PluginResult<()> {
        match self.poller.poll_at(now) {
            Ok(result) => {
                let style = match result.color {
                    StatusColor::Good => self.good_style,
                    StatusColor::Bad => self.bad_style,
                };
                self.last_good = Some(StatusBarSegment::from(&result).style(style));
                self.last_error = None;
                self.next_refresh = Some(result.valid_until);
                Ok(())
            }
            Err(e) => {
                self.next_refresh = Some(
                    TimeDelta::from_std(self.poller.config().poll_interval())
                        .ok()
                        .and_then(|retry_in| now.checked_add_signed(retry_in))
                        .unwrap_or(DateTime::<Utc>::MAX_UTC),
                );
                self.last_error = Some(e.clone());
                Err(PluginError::from(e))
            }
        }
    }

    fn error_segment(&self) -> StatusBarSegment {
        StatusBarSegment::new(format!("{} unavailable", self.poller.config().subject_id()))
            .icon("!")
            .style(self.bad_style)
    }
}

impl<C: HttpClient> Plugin for StreamStatusPlugin<C> {
    fn name(&self) -> &'static str {
        "stream-status"
    }

    fn config(&self) -> PluginConfig {
        PluginConfig {
            refresh_interval: self.poller.config().poll_interval(),
        }
    }

    fn refresh(&mut self) -> PluginResult<()> {
        self.refresh_at(Utc::now())
    }

    fn render(&self) -> StatusBarSegment {
        match (&self.last_error, &self.last_good, self.stale_policy) {
            (None, Some(segment), _) | (Some(_), Some(segment), StalePolicy::KeepLast) => {
                segment.clone()
            }
            (Some(_), _, _) => self.error_segment(),
            // Not refreshed yet
            (None, None, _) => StatusBarSegment::new(self.poller.config().subject_id())
                .icon("?")
                .style(self.bad_style),
        }
    }
}

impl<C> std::fmt::Debug for StreamStatusPlugin<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamStatusPlugin")
            .field("poller", &self.poller)
            .field("stale_policy", &self.stale_policy)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}
