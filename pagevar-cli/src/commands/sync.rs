//! `pagevar sync` — one full collect/apply synchronization run.

use anyhow::{Context, Result};
use clap::Args;

use pagevar_client::WorkspaceClient;
use pagevar_core::settings::Settings;
use pagevar_sync::{SyncReport, WriteOutcome};

/// Arguments for `pagevar sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Show what would be rewritten without writing anything back.
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let settings = Settings::load().context("failed to load settings")?;
        let client = WorkspaceClient::new(&settings);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to build async runtime")?;
        let report = runtime
            .block_on(pagevar_sync::run(&client, self.dry_run))
            .context("synchronization run failed")?;

        print_report(&report, self.dry_run);
        Ok(())
    }
}

fn print_report(report: &SyncReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };

    println!(
        "{prefix}✓ {} page(s), {} variable(s) collected ({} written, {} unchanged)",
        report.pages,
        report.variables.len(),
        report.written(),
        report.unchanged(),
    );

    for outcome in &report.writes {
        match outcome {
            WriteOutcome::Written { block_id } => println!("  ✎  {block_id}"),
            WriteOutcome::WouldWrite { block_id } => println!("  ~  {block_id}"),
            WriteOutcome::Unchanged { block_id } => println!("  ·  {block_id}"),
        }
    }
}
