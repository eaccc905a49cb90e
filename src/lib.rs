//! # Streamwatch
//!
//! A cached live/offline status poller for streaming channels.
//!
//! On each tick a [`StatusPoller`] resolves the channel's display name (once,
//! then cached), asks the API whether the channel is live, fills the online or
//! offline template and reports when the caller should poll again. An offline
//! channel is a normal result; only request failures are errors.
//!
//! ## Features
//!
//! - **Cached identity**: the display name is looked up once per poller
//! - **Typed failures**: configuration, identity and status errors are distinct
//! - **Bounded requests**: the default client times out after a few seconds
//! - **Status bar integration**: [`StreamStatusPlugin`] and [`StatusBarWidget`]
//!   turn poll results into styled ratatui segments
//!
//! ## Example
//!
//! ```no_run
//! use streamwatch::{PollerConfig, StatusPoller};
//!
//! fn main() -> streamwatch::Result<()> {
//!     let config = PollerConfig::builder("exotic_bug", "my-client-id").build()?;
//!     let poller = StatusPoller::new(config)?;
//!
//!     let result = poller.poll()?;
//!     println!("{} (next poll after {})", result.display_text, result.valid_until);
//!
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
mod config;
mod error;
pub mod http;
mod plugins;
mod poller;
mod status_bar;
pub mod template;

// Re-export public API
pub use config::{
    IdentityPolicy, PollerConfig, PollerConfigBuilder, DEFAULT_API_BASE_URL,
    DEFAULT_OFFLINE_TEMPLATE, DEFAULT_ONLINE_TEMPLATE, DEFAULT_POLL_INTERVAL,
    DEFAULT_REQUEST_TIMEOUT,
};
pub use error::{ConfigError, Error, FetchError, Result};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use plugins::{
    Plugin, PluginConfig, PluginError, PluginResult, StalePolicy, StreamStatusPlugin,
};
pub use poller::{PollResult, StatusColor, StatusPoller};
pub use status_bar::{
    StatusBarConfig, StatusBarSegment, StatusBarWidget, BAD_COLOR, GOOD_COLOR,
};
