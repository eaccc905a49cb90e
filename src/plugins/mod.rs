//! Plugin seam for status bar hosts.
//!
//! A host owns the schedule: it calls [`Plugin::refresh`] on its own timer and
//! [`Plugin::render`] whenever it redraws. Plugins are display-only.

mod stream_status;

pub use stream_status::{StalePolicy, StreamStatusPlugin};

use std::time::Duration;

use crate::status_bar::StatusBarSegment;

/// Configuration for plugin behavior.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PluginConfig {
    /// How often to refresh the plugin's data.
    pub refresh_interval: Duration,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(60),
        }
    }
}

/// The core plugin trait.
pub trait Plugin: Send + Sync {
    /// Unique name for this plugin type.
    fn name(&self) -> &'static str;

    /// Plugin configuration.
    fn config(&self) -> PluginConfig {
        PluginConfig::default()
    }

    /// Refresh the plugin's data.
    /// This is called periodically based on `refresh_interval`.
    ///
    /// # Errors
    /// Returns an error if refresh fails. The plugin keeps enough state to
    /// render something sensible afterwards.
    fn refresh(&mut self) -> PluginResult<()>;

    /// Render the plugin's status bar segment.
    fn render(&self) -> StatusBarSegment;

    /// Cleanup when plugin is removed. Called once.
    fn shutdown(&mut self) {}
}

/// Result type for plugin operations.
pub type PluginResult<T> = Result<T, PluginError>;

/// Errors that can occur in plugin operations.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Plugin refresh failed.
    #[error("plugin refresh failed: {0}")]
    RefreshFailed(#[from] crate::error::Error),
}
