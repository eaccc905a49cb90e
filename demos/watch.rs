//! Watch a channel and keep a one-line status bar up to date.
//!
//! Run with:
//! `STREAMWATCH_SUBJECT=exotic_bug STREAMWATCH_CLIENT_ID=... cargo run --example watch`
//!
//! Set `RUST_LOG=streamwatch=debug` to see lookups.

use std::io::stdout;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use ratatui::{backend::CrosstermBackend, Terminal, TerminalOptions, Viewport};
use streamwatch::{Plugin, PollerConfig, StatusBarWidget, StatusPoller, StreamStatusPlugin};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Pass every STREAMWATCH_* variable through as a config option
    let options: Vec<(String, String)> = std::env::vars()
        .filter_map(|(key, value)| {
            key.strip_prefix("STREAMWATCH_")
                .map(|option| (option.to_ascii_lowercase(), value))
        })
        .map(|(key, value)| match key.as_str() {
            "subject" => ("subject_id".to_string(), value),
            "client_id" => ("credential_id".to_string(), value),
            _ => (key, value),
        })
        .collect();

    let config = PollerConfig::from_options(options).context("invalid configuration")?;
    // The blocking client must be created and dropped off the async runtime
    let poller = tokio::task::spawn_blocking(move || StatusPoller::new(config)).await??;
    let mut plugin = Some(StreamStatusPlugin::new(poller));

    let outcome = run(&mut plugin).await;

    // Every exit path hands the plugin back to a blocking thread
    if let Some(mut plugin) = plugin.take() {
        tokio::task::spawn_blocking(move || plugin.shutdown()).await?;
    }
    println!();
    outcome
}

async fn run(slot: &mut Option<StreamStatusPlugin>) -> anyhow::Result<()> {
    let mut terminal = Terminal::with_options(
        CrosstermBackend::new(stdout()),
        TerminalOptions {
            viewport: Viewport::Inline(1),
        },
    )?;

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }

        let Some(mut plugin) = slot.take() else {
            return Ok(());
        };
        if plugin.needs_refresh(Utc::now()) {
            // The poller blocks on the network
            let (returned, outcome) = tokio::task::spawn_blocking(move || {
                let outcome = plugin.refresh();
                (plugin, outcome)
            })
            .await?;
            plugin = returned;

            if let Err(e) = outcome {
                tracing::warn!("{}", e);
            }
        }
        let segments = [plugin.render()];
        *slot = Some(plugin);

        terminal.draw(|frame| frame.render_widget(StatusBarWidget::new(&segments), frame.area()))?;
    }
}
