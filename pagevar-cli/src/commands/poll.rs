//! `pagevar poll` — fixed-interval modified-after polling.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use pagevar_core::settings::Settings;

/// Arguments for `pagevar poll`.
#[derive(Args, Debug)]
pub struct PollArgs {
    /// Seconds between poll cycles.
    #[arg(long, default_value_t = pagevar_daemon::DEFAULT_POLL_INTERVAL.as_secs())]
    pub interval_secs: u64,
}

impl PollArgs {
    pub fn run(self) -> Result<()> {
        let settings = Settings::load().context("failed to load settings")?;
        pagevar_daemon::start_blocking(settings, Duration::from_secs(self.interval_secs))
            .context("polling runtime failed")?;
        Ok(())
    }
}
